//! # yelp-core
//!
//! Core library for exporting Yelp Fusion search results to `|`-delimited files.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use yelp_core::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> yelp_core::Result<()> {
//!     let config = Config::load(None)?;
//!     let credentials = Credentials::resolve(None, None, &config.credentials)?;
//!
//!     let client = YelpClient::new(&config.api)?;
//!     let token = client.obtain_token(&credentials).await?;
//!
//!     let mut writer = RowWriter::create("business.csv".as_ref())?;
//!     let query = SearchQuery::new("restaurants", "New York City, NY", 3);
//!     Exporter::new(&client, &token).export_businesses(&query, &mut writer).await?;
//!     writer.finish()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           API Layer                 │  HTTP client, token, response models
//! ├─────────────────────────────────────┤
//! │          Core Layer                 │  Pagination, flattening, row output
//! ├─────────────────────────────────────┤
//! │        Storage Layer                │  Configuration, credentials
//! ├─────────────────────────────────────┤
//! │         Utils Layer                 │  Validation, error conversion
//! └─────────────────────────────────────┘
//! ```

pub use error::AppError;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::Result;
    pub use crate::error::AppError;

    pub use crate::api::client::YelpClient;
    pub use crate::api::models::{BearerToken, BusinessDetail, ReviewSet, SearchPage};

    pub use crate::core::exporter::{ExportSummary, Exporter, PagePlan, SearchQuery};
    pub use crate::core::records::{BusinessRow, Record, ReviewRow};
    pub use crate::core::source::BusinessSource;
    pub use crate::core::writer::RowWriter;

    pub use crate::storage::config::{ApiSettings, Config};
    pub use crate::storage::credentials::Credentials;
}

/// Business logic layer - paging, flattening and writing rows.
///
/// - [`core::exporter`]: page planning and the export loops
/// - [`core::records`]: one flattening function per record kind
/// - [`core::writer`]: header-on-first-row `|` output
/// - [`core::source`]: the endpoint seam the exporter is written against
pub mod core;

/// Storage layer - configuration file and credential resolution.
pub mod storage;

/// Utilities layer - validation and error conversion helpers.
pub mod utils;

/// API layer - Yelp Fusion HTTP client and data models.
pub mod api;

/// Error handling - hierarchical error system with severity and hints.
pub mod error;

/// Convenient Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
