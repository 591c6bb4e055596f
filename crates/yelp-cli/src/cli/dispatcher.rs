use crate::cli::command_handlers::{ConfigHandler, ExportHandler};
use crate::cli::main_types::{Commands, ConfigCommands};
use std::path::PathBuf;
use yelp_core::api::client::YelpClient;
use yelp_core::error::{AppError, AuthError, CliError};
use yelp_core::storage::config::Config;
use yelp_core::storage::credentials::Credentials;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    client_id: Option<String>,
    client_secret: Option<String>,
    interactive: bool,
}

impl Dispatcher {
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Self {
        Self {
            config,
            config_path,
            client_id,
            client_secret,
            interactive: false,
        }
    }

    /// Allow prompting for a missing client secret
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    fn create_client(&self) -> Result<YelpClient, AppError> {
        log::debug!("Creating client for {}", self.config.api.host);
        Ok(YelpClient::new(&self.config.api)?)
    }

    // Flag/env first, then the config file, then the prompt
    fn resolve_credentials(&self) -> Result<Credentials, AppError> {
        match Credentials::resolve(
            self.client_id.clone(),
            self.client_secret.clone(),
            &self.config.credentials,
        ) {
            Err(AuthError::MissingCredentials { field })
                if field == "client_secret" && self.interactive =>
            {
                let secret = rpassword::prompt_password("Yelp client secret: ").map_err(|e| {
                    CliError::InvalidArguments(format!("Failed to read client secret: {}", e))
                })?;
                Ok(Credentials::resolve(
                    self.client_id.clone(),
                    Some(secret),
                    &self.config.credentials,
                )?)
            }
            other => Ok(other?),
        }
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Businesses(args) => {
                let query = args.search.query()?;
                let credentials = self.resolve_credentials()?;
                let client = self.create_client()?;
                ExportHandler::new(&client, &credentials)
                    .businesses(&query, &args.output)
                    .await
            }
            Commands::Reviews(args) => {
                let query = args.search.query()?;
                let credentials = self.resolve_credentials()?;
                let client = self.create_client()?;
                ExportHandler::new(&client, &credentials)
                    .reviews(&query, &args.output)
                    .await
            }
            Commands::All(args) => {
                let query = args.search.query()?;
                let credentials = self.resolve_credentials()?;
                let client = self.create_client()?;
                ExportHandler::new(&client, &credentials)
                    .all(&query, &args.business_output, &args.reviews_output)
                    .await
            }
            Commands::Config { command } => {
                let mut handler =
                    ConfigHandler::new(self.config.clone(), self.config_path.clone());
                match command {
                    ConfigCommands::Show => {
                        handler.show();
                        Ok(())
                    }
                    ConfigCommands::Set {
                        id,
                        grant_type,
                        host,
                        timeout,
                    } => handler.set(id, grant_type, host, timeout),
                    ConfigCommands::Validate => {
                        let credentials = self.resolve_credentials()?;
                        let client = self.create_client()?;
                        handler.validate(&client, &credentials).await
                    }
                }
            }
        }
    }
}
