// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::models::HttpConfig;

/// Create a configured asynchronous HTTP client.
///
/// No timeout is applied unless one is configured.
pub fn create_client(config: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(&config.user_agent);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_default() {
        assert!(create_client(&HttpConfig::default()).is_ok());
    }

    #[test]
    fn test_create_client_with_timeout() {
        let config = HttpConfig {
            timeout_secs: Some(5),
            ..HttpConfig::default()
        };
        assert!(create_client(&config).is_ok());
    }
}
