//! The ingestion engine: reconciles pushed host reports against the
//! persistent entity hierarchy and records livestate history.
//!
//! One call to [`ingest`] handles one host report. Everything it writes
//! -- entities created along the way, livestates, metrics -- belongs to
//! a single database transaction: either the whole report lands, or
//! nothing does.

mod entity;
mod livestate;

use validator::Validate;
use watchpost_core::error::CoreError;
use watchpost_core::report::{HostFeedback, HostReport};
use watchpost_db::DbPool;

use crate::error::AppResult;

/// Ingest one host report (with its nested service reports).
///
/// Order of operations:
/// 1. resolve or create the host entity (and transitively its realm),
/// 2. record the host livestate, if the report carries one,
/// 3. for each service report, resolve or create the service entity
///    under the host and record its livestate, if any,
/// 4. compute feedback from the host entity's configuration.
///
/// Ingesting the same report twice is safe: the second call resolves
/// the same entities and appends one more livestate per reporting
/// entity -- history grows, the hierarchy does not.
pub async fn ingest(pool: &DbPool, report: &HostReport) -> AppResult<HostFeedback> {
    report
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let mut tx = pool.begin().await?;

    let host = entity::resolve_host(&mut tx, report).await?;

    if let Some(snapshot) = &report.livestate {
        livestate::record(&mut tx, &host, snapshot).await?;
    }

    for service_report in &report.services {
        let service = entity::resolve_service(&mut tx, &host, service_report).await?;
        if let Some(snapshot) = &service_report.livestate {
            livestate::record(&mut tx, &service, snapshot).await?;
        }
    }

    tx.commit().await?;

    tracing::info!(
        host = %host.name,
        services = report.services.len(),
        "Ingested host report"
    );

    Ok(HostFeedback {
        check_interval: host.checkall_interval,
        freshness_threshold: host.heartbeat_interval,
        passive_check_enabled: host.is_monitored,
        // This server only accepts passive reports.
        active_check_enabled: false,
    })
}
