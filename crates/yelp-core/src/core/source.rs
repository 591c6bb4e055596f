use crate::api::client::YelpClient;
use crate::api::models::{BearerToken, BusinessDetail, ReviewSet, SearchPage};
use crate::error::ApiError;
use async_trait::async_trait;

/// The three read endpoints the exporter needs
#[async_trait]
pub trait BusinessSource {
    async fn search(
        &self,
        token: &BearerToken,
        term: &str,
        location: &str,
        limit: u32,
        offset: u32,
    ) -> Result<SearchPage, ApiError>;

    async fn business_details(
        &self,
        token: &BearerToken,
        business_id: &str,
    ) -> Result<BusinessDetail, ApiError>;

    async fn reviews(&self, token: &BearerToken, business_id: &str)
    -> Result<ReviewSet, ApiError>;
}

#[async_trait]
impl BusinessSource for YelpClient {
    async fn search(
        &self,
        token: &BearerToken,
        term: &str,
        location: &str,
        limit: u32,
        offset: u32,
    ) -> Result<SearchPage, ApiError> {
        YelpClient::search(self, token, term, location, limit, offset).await
    }

    async fn business_details(
        &self,
        token: &BearerToken,
        business_id: &str,
    ) -> Result<BusinessDetail, ApiError> {
        YelpClient::business_details(self, token, business_id).await
    }

    async fn reviews(
        &self,
        token: &BearerToken,
        business_id: &str,
    ) -> Result<ReviewSet, ApiError> {
        YelpClient::reviews(self, token, business_id).await
    }
}
