//! Input validation for command line and configuration values

use crate::error::CliError;

/// Largest number of businesses the search endpoint will page through
pub const MAX_RECORDS: u32 = 1000;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate search arguments before any request is made
pub fn validate_search(location: &str, records: u32) -> crate::Result<()> {
    if location.trim().is_empty() {
        return Err(CliError::InvalidArguments("Location cannot be empty".to_string()).into());
    }
    if records == 0 {
        return Err(
            CliError::InvalidArguments("Number of records must be at least 1".to_string()).into(),
        );
    }
    if records > MAX_RECORDS {
        log::warn!(
            "{} records requested; the search endpoint stops at {}",
            records,
            MAX_RECORDS
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_valid_urls() {
        assert!(validate_url("http://localhost:3000").is_ok());
        assert!(validate_url("https://api.yelp.com").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("api.yelp.com").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_search() {
        assert!(validate_search("New York City, NY", 3).is_ok());
        assert!(validate_search("New York City, NY", 5000).is_ok());
        assert!(validate_search("  ", 3).is_err());
        assert!(validate_search("Boston", 0).is_err());
    }
}
