// src/services/fetcher.rs

//! Remote report fetcher.
//!
//! Downloads the fixed set of bulletins one after another over a single
//! client. Any failure aborts the whole fetch.

use reqwest::blocking::Client;

use crate::error::{AppError, Result};
use crate::models::{FetchConfig, REPORT_IDS, ReportSource};
use crate::utils::decode::decode_with_encoding;
use crate::utils::http::create_client;

/// Source of remote report texts.
pub trait ReportProvider {
    /// Fetch every configured report, in order.
    fn fetch_reports(&self) -> Result<Vec<ReportSource>>;
}

/// Service for downloading permit bulletins.
pub struct ReportFetcher {
    config: FetchConfig,
    client: Client,
}

impl ReportFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
            config: config.clone(),
        })
    }

    /// Fetch a single report by id.
    pub fn fetch_report(&self, report_id: u32) -> Result<ReportSource> {
        let url = self.config.report_url_for(report_id);
        log::info!("Fetching report {} from {}", report_id, url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::from_transport(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .map_err(|e| AppError::from_transport(&url, e))?;
        let (text, encoding) = decode_with_encoding(&bytes);
        log::debug!(
            "Report {} decoded as {} ({} bytes)",
            report_id,
            encoding.label(),
            bytes.len()
        );

        Ok(ReportSource::new(text, url))
    }
}

impl ReportProvider for ReportFetcher {
    fn fetch_reports(&self) -> Result<Vec<ReportSource>> {
        REPORT_IDS
            .iter()
            .map(|&report_id| self.fetch_report(report_id))
            .collect()
    }
}
