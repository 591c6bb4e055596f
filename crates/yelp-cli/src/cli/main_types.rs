use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use yelp_core::core::exporter::SearchQuery;
use yelp_core::error::AppError;
use yelp_core::utils::validation::validate_search;

#[derive(Parser)]
#[command(name = "yelp-export")]
#[command(about = "Export Yelp businesses and reviews to '|'-delimited files")]
#[command(version)]
#[command(after_help = "Examples:
  yelp-export businesses                                   # 3 restaurants in New York City
  yelp-export businesses --term coffee --location Boston -n 120 -o coffee.csv
  yelp-export reviews --location \"San Francisco, CA\" -n 20
  yelp-export all -n 50                                    # business.csv and reviews.csv
  yelp-export config set --id <client-id>
  yelp-export config validate                              # Check credentials

Environment Variables:
  YELP_CLIENT_ID       OAuth client id
  YELP_CLIENT_SECRET   OAuth client secret
  RUST_LOG             Log filter (overrides --verbose)")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// OAuth client id
    #[arg(long, global = true, env = "YELP_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, global = true, env = "YELP_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export business details, one row per business
    Businesses(BusinessesArgs),
    /// Export reviews, one row per business
    Reviews(ReviewsArgs),
    /// Export businesses and reviews with a single token
    All(AllArgs),
    /// Configuration management (show, set, validate)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search term
    #[arg(long, default_value = "restaurants", help_heading = "Search Options")]
    pub term: String,

    /// Search location
    #[arg(long, default_value = "New York City, NY", help_heading = "Search Options")]
    pub location: String,

    /// Number of businesses to export (the API stops at 1000)
    #[arg(short = 'n', long, default_value_t = 3, help_heading = "Search Options")]
    pub records: u32,
}

impl SearchArgs {
    pub fn query(&self) -> Result<SearchQuery, AppError> {
        validate_search(&self.location, self.records)?;
        Ok(SearchQuery::new(
            self.term.clone(),
            self.location.clone(),
            self.records,
        ))
    }
}

#[derive(Args, Debug)]
pub struct BusinessesArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Output file
    #[arg(short, long, default_value = "business.csv")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct ReviewsArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Output file
    #[arg(short, long, default_value = "reviews.csv")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct AllArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Business details output file
    #[arg(long, default_value = "business.csv")]
    pub business_output: PathBuf,

    /// Reviews output file
    #[arg(long, default_value = "reviews.csv")]
    pub reviews_output: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration values
    #[command(after_help = "Examples:
  yelp-export config set --id abc123
  yelp-export config set --host http://localhost:8080 --timeout 10")]
    Set {
        /// OAuth client id to store
        #[arg(long)]
        id: Option<String>,
        /// OAuth grant type
        #[arg(long)]
        grant_type: Option<String>,
        /// API host, e.g. https://api.yelp.com
        #[arg(long)]
        host: Option<String>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Obtain a token to check the configured credentials
    Validate,
}
