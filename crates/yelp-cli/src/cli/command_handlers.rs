use std::path::{Path, PathBuf};
use yelp_core::api::client::YelpClient;
use yelp_core::core::exporter::{ExportSummary, Exporter, SearchQuery};
use yelp_core::core::writer::RowWriter;
use yelp_core::error::{AppError, CliError, ConfigError};
use yelp_core::storage::config::Config;
use yelp_core::storage::credentials::Credentials;
use yelp_core::utils::validation::validate_url;

pub struct ExportHandler<'a> {
    client: &'a YelpClient,
    credentials: &'a Credentials,
}

impl<'a> ExportHandler<'a> {
    pub fn new(client: &'a YelpClient, credentials: &'a Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub async fn businesses(&self, query: &SearchQuery, output: &Path) -> Result<(), AppError> {
        let token = self.client.obtain_token(self.credentials).await?;
        let mut writer = RowWriter::create(output)?;

        let summary = Exporter::new(self.client, &token)
            .export_businesses(query, &mut writer)
            .await?;
        writer.finish()?;

        print_summary("businesses", &summary, output);
        Ok(())
    }

    pub async fn reviews(&self, query: &SearchQuery, output: &Path) -> Result<(), AppError> {
        let token = self.client.obtain_token(self.credentials).await?;
        let mut writer = RowWriter::create(output)?;

        let summary = Exporter::new(self.client, &token)
            .export_reviews(query, &mut writer)
            .await?;
        writer.finish()?;

        print_summary("reviews", &summary, output);
        Ok(())
    }

    /// One token serves both exports
    pub async fn all(
        &self,
        query: &SearchQuery,
        business_output: &Path,
        reviews_output: &Path,
    ) -> Result<(), AppError> {
        let token = self.client.obtain_token(self.credentials).await?;
        let mut businesses = RowWriter::create(business_output)?;
        let mut reviews = RowWriter::create(reviews_output)?;

        let (business_summary, review_summary) = Exporter::new(self.client, &token)
            .export_all(query, &mut businesses, &mut reviews)
            .await?;
        businesses.finish()?;
        reviews.finish()?;

        print_summary("businesses", &business_summary, business_output);
        print_summary("reviews", &review_summary, reviews_output);
        Ok(())
    }
}

fn print_summary(kind: &str, summary: &ExportSummary, output: &Path) {
    println!(
        "✅ Exported {} {} to {} ({} available, {} page(s))",
        summary.rows_written,
        kind,
        output.display(),
        summary.total_available,
        summary.pages
    );
    if summary.skipped > 0 {
        println!("⚠️  Skipped {} business(es), see log for details", summary.skipped);
    }
}

pub struct ConfigHandler {
    config: Config,
    config_path: Option<PathBuf>,
}

impl ConfigHandler {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    pub fn show(&self) {
        let credentials = &self.config.credentials;
        let api = &self.config.api;

        println!("Current Configuration:");
        println!("=====================");
        let path = match &self.config_path {
            Some(path) => Some(path.clone()),
            None => Config::config_file_path().ok(),
        };
        match path {
            Some(path) => println!("File: {}", path.display()),
            None => println!("File: (home directory not found)"),
        }

        println!("\nCredentials:");
        println!(
            "  Client ID: {}",
            credentials.client_id.as_deref().unwrap_or("❌ Not set")
        );
        if credentials.client_secret.as_deref().is_some_and(|s| !s.is_empty()) {
            println!("  Client Secret: ✅ Set");
        } else {
            println!("  Client Secret: ❌ Not set (use YELP_CLIENT_SECRET)");
        }
        println!(
            "  Grant Type: {}",
            credentials.grant_type.as_deref().unwrap_or("client_credentials")
        );

        println!("\nAPI:");
        println!("  Host: {}", api.host);
        println!("  Token Path: {}", api.token_path);
        println!("  Search Path: {}", api.search_path);
        println!("  Business Path: {}", api.business_path);
        println!("  Timeout: {}s", api.timeout_seconds);
    }

    pub fn set(
        &mut self,
        id: Option<String>,
        grant_type: Option<String>,
        host: Option<String>,
        timeout: Option<u64>,
    ) -> Result<(), AppError> {
        let mut updated_fields = Vec::new();

        if let Some(host) = host {
            validate_url(&host)?;
            updated_fields.push(format!("host to: {}", host));
            self.config.api.host = host;
        }

        if let Some(timeout) = timeout {
            if timeout == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "timeout_seconds".to_string(),
                    value: timeout.to_string(),
                    reason: "must be at least 1 second".to_string(),
                }
                .into());
            }
            updated_fields.push(format!("timeout to: {}s", timeout));
            self.config.api.timeout_seconds = timeout;
        }

        if let Some(id) = id {
            updated_fields.push(format!("client id to: {}", id));
            self.config.credentials.client_id = Some(id);
        }

        if let Some(grant_type) = grant_type {
            updated_fields.push(format!("grant type to: {}", grant_type));
            self.config.credentials.grant_type = Some(grant_type);
        }

        if updated_fields.is_empty() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "No configuration values provided. Use --id, --grant-type, --host and/or --timeout"
                    .to_string(),
            )));
        }

        self.config.save(self.config_path.clone())?;
        println!("✅ Set {}", updated_fields.join(", "));
        println!("Configuration saved successfully.");
        Ok(())
    }

    pub async fn validate(
        &self,
        client: &YelpClient,
        credentials: &Credentials,
    ) -> Result<(), AppError> {
        log::debug!("Requesting token from {}", client.base_url());
        client.obtain_token(credentials).await?;

        println!("✅ Credentials validated successfully");
        println!("  Host: {}", client.base_url());
        println!("  Client ID: {}", credentials.client_id);
        Ok(())
    }
}
