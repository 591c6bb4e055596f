//! Helper functions for turning reqwest failures into `ApiError` with endpoint context.

use crate::error::ApiError;

/// Convert reqwest send errors, distinguishing timeouts
pub fn convert_request_error(error: reqwest::Error, endpoint: &str, timeout_secs: u64) -> ApiError {
    if error.is_timeout() {
        return convert_timeout_error(endpoint, timeout_secs);
    }
    ApiError::Http {
        status: error.status().map(|s| s.as_u16()).unwrap_or(0),
        endpoint: endpoint.to_string(),
        message: format!("request failed: {}", error),
    }
}

pub fn convert_timeout_error(endpoint: &str, timeout_secs: u64) -> ApiError {
    ApiError::Timeout {
        timeout_secs,
        endpoint: endpoint.to_string(),
    }
}

/// Convert body decoding errors into a malformed-response error
pub fn convert_json_error(error: reqwest::Error, endpoint: &str) -> ApiError {
    ApiError::Malformed {
        endpoint: endpoint.to_string(),
        message: format!("JSON parse error: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_timeout_error() {
        let api_error = convert_timeout_error("/v3/businesses/search", 30);
        match api_error {
            ApiError::Timeout {
                endpoint,
                timeout_secs,
            } => {
                assert_eq!(endpoint, "/v3/businesses/search");
                assert_eq!(timeout_secs, 30);
            }
            _ => panic!("Expected Timeout error"),
        }
    }
}
