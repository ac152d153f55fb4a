// src/pipeline/collect.rs

//! Collection entry point: acquire, parse, reconcile.

use crate::error::{AppError, Result};
use crate::models::{AppliedFilters, CollectOutcome, CollectRequest, Config, PermitRecord};
use crate::services::{ReportFetcher, ReportProvider, parse_report_text};

use super::acquire::acquire_sources;
use super::reconcile::reconcile;

/// Run a collection, fetching remote reports over HTTP when requested.
pub fn collect(request: &CollectRequest, config: &Config) -> Result<CollectOutcome> {
    let fetcher = if request.fetch_remote {
        Some(ReportFetcher::new(&config.fetch)?)
    } else {
        None
    };
    collect_with(
        request,
        fetcher.as_ref().map(|f| f as &dyn ReportProvider),
    )
}

/// Run a collection and return only the reconciled records.
pub fn collect_records(request: &CollectRequest, config: &Config) -> Result<Vec<PermitRecord>> {
    Ok(collect(request, config)?.rows)
}

/// Run a collection with an explicit remote report provider.
pub fn collect_with(
    request: &CollectRequest,
    remote: Option<&dyn ReportProvider>,
) -> Result<CollectOutcome> {
    let sources = acquire_sources(request, remote)?;
    if sources.is_empty() {
        return Err(AppError::parse("No report content provided."));
    }

    let mut parsed = Vec::new();
    for source in &sources {
        let records = parse_report_text(&source.text, &request.project_code)?;
        log::info!("Parsed {} permits from {}", records.len(), source.label);
        parsed.extend(records);
    }

    let parsed_count = parsed.len();
    let cutoff = request.cutoff();
    let rows = reconcile(parsed, cutoff, request.homeowner_only);

    log::info!(
        "Reconciled {} parsed permits into {} (cutoff {}, project code {}, homeowner only: {})",
        parsed_count,
        rows.len(),
        cutoff,
        request.project_code,
        request.homeowner_only
    );

    Ok(CollectOutcome {
        rows,
        source_count: sources.len(),
        parsed_count,
        filters: AppliedFilters {
            days: request.effective_days(),
            project_code: request.project_code.clone(),
            homeowner_only: request.homeowner_only,
            cutoff,
        },
    })
}
