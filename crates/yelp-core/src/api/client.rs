use crate::api::models::{BearerToken, BusinessDetail, ReviewSet, SearchPage, TokenResponse};
use crate::error::{ApiError, AuthError};
use crate::storage::config::ApiSettings;
use crate::storage::credentials::Credentials;
use crate::utils::error_helpers::*;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("yelp-export/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct YelpClient {
    client: Client,
    settings: ApiSettings,
}

impl YelpClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| convert_request_error(e, "client_init", settings.timeout_seconds))?;

        let mut settings = settings.clone();
        settings.host = settings.host.trim_end_matches('/').to_string();

        Ok(YelpClient { client, settings })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    pub fn base_url(&self) -> &str {
        &self.settings.host
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.settings.host, path);
        self.client.request(method, url)
    }

    /// POST the client credentials and return the bearer token
    pub async fn obtain_token(&self, credentials: &Credentials) -> Result<BearerToken, AuthError> {
        let endpoint = self.settings.token_path.as_str();
        log::debug!("Requesting bearer token from {}", endpoint);

        let response = self
            .build_request(Method::POST, endpoint)
            .form(&credentials.form_fields())
            .send()
            .await
            .map_err(|e| {
                AuthError::TokenRequestFailed(convert_request_error(
                    e,
                    endpoint,
                    self.settings.timeout_seconds,
                ))
            })?;

        let token: TokenResponse = self
            .handle_response(response, endpoint)
            .await
            .map_err(AuthError::TokenRequestFailed)?;

        match token.access_token {
            Some(access_token) if !access_token.is_empty() => {
                log::debug!(
                    "Bearer token acquired (type: {}, expires in: {:?}s)",
                    token.token_type.as_deref().unwrap_or("unknown"),
                    token.expires_in
                );
                Ok(BearerToken::new(access_token))
            }
            _ => Err(AuthError::MissingAccessToken),
        }
    }

    /// Authenticated GET against `host + path`, decoding the body into `T`
    pub async fn request<T>(
        &self,
        path: &str,
        token: &BearerToken,
        params: &[(&str, String)],
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.settings.host, path);
        self.get(url, path, token, params).await
    }

    /// Query the search endpoint by term and location
    pub async fn search(
        &self,
        token: &BearerToken,
        term: &str,
        location: &str,
        limit: u32,
        offset: u32,
    ) -> Result<SearchPage, ApiError> {
        let params = [
            ("term", term.to_string()),
            ("location", location.to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        self.request(&self.settings.search_path, token, &params)
            .await
    }

    pub async fn business_details(
        &self,
        token: &BearerToken,
        business_id: &str,
    ) -> Result<BusinessDetail, ApiError> {
        let url = self.business_url(business_id, &[])?;
        let endpoint = url.path().to_string();
        self.get(url, &endpoint, token, &[]).await
    }

    pub async fn reviews(
        &self,
        token: &BearerToken,
        business_id: &str,
    ) -> Result<ReviewSet, ApiError> {
        let url = self.business_url(business_id, &["reviews"])?;
        let endpoint = url.path().to_string();
        self.get(url, &endpoint, token, &[]).await
    }

    /// `business_path` + id (+ tail), with the id encoded as a single path segment
    pub fn business_url(&self, business_id: &str, tail: &[&str]) -> Result<Url, ApiError> {
        let endpoint = &self.settings.business_path;
        let invalid = |message: String| ApiError::Http {
            status: 0,
            endpoint: endpoint.clone(),
            message,
        };

        let mut url = Url::parse(&format!("{}{}", self.settings.host, endpoint))
            .map_err(|e| invalid(format!("Invalid business URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| invalid("Host cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(business_id)
            .extend(tail);
        Ok(url)
    }

    async fn get<U, T>(
        &self,
        url: U,
        endpoint: &str,
        token: &BearerToken,
        params: &[(&str, String)],
    ) -> Result<T, ApiError>
    where
        U: reqwest::IntoUrl,
        T: DeserializeOwned,
    {
        log::debug!("GET {} {:?}", endpoint, params);

        let mut request = self.client.get(url).bearer_auth(token.as_str());
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request
            .send()
            .await
            .map_err(|e| convert_request_error(e, endpoint, self.settings.timeout_seconds))?;

        self.handle_response(response, endpoint).await
    }

    pub async fn handle_response<T>(&self, response: Response, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| convert_json_error(e, endpoint))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            match status.as_u16() {
                401 | 403 => Err(ApiError::Unauthorized {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    server_message: error_text,
                }),
                408 | 504 => Err(ApiError::Timeout {
                    timeout_secs: self.settings.timeout_seconds,
                    endpoint: endpoint.to_string(),
                }),
                _ => Err(ApiError::Http {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    message: error_text,
                }),
            }
        }
    }
}
