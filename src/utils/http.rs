// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use crate::error::{AppError, Result};
use crate::models::FetchConfig;

/// Create a configured blocking HTTP client.
///
/// Redirects are not followed so that a 3xx answer surfaces as a status
/// failure like any other non-2xx response.
pub fn create_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .redirect(Policy::none())
        .build()
        .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))
}
