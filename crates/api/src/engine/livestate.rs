//! Livestate recording: append one status snapshot (plus its metrics)
//! to an entity's history.

use chrono::Utc;
use sqlx::{Postgres, Transaction};
use watchpost_core::error::CoreError;
use watchpost_core::perfdata::{MetricKind, PerfData};
use watchpost_core::report::LivestateReport;
use watchpost_db::models::entity::Entity;
use watchpost_db::models::livestate::{CreateLivestate, CreateMetric, Livestate};
use watchpost_db::repositories::{LivestateRepo, MetricTypeRepo, StateRepo};

use crate::error::AppResult;

/// Record one livestate for an entity.
///
/// The reported state name must resolve against the seeded state
/// directory; an unknown name aborts the whole ingestion call. The
/// `is_acknowledged` flag is a point-in-time copy of the entity's
/// `is_auto_acknowledge` -- flipping the entity flag later must not
/// rewrite history.
pub(super) async fn record(
    tx: &mut Transaction<'_, Postgres>,
    entity: &Entity,
    report: &LivestateReport,
) -> AppResult<Livestate> {
    if report.state.is_empty() {
        return Err(CoreError::Validation("livestate state must not be empty".into()).into());
    }

    let state = StateRepo::find_by_name(&mut **tx, &report.state)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            kind: "state",
            name: report.state.clone(),
        })?;

    let timestamp = report.timestamp_utc()?.unwrap_or_else(Utc::now);

    let livestate = LivestateRepo::append(
        tx,
        &CreateLivestate {
            entity_id: entity.id,
            state_id: state.id,
            timestamp,
            output: report.output.clone(),
            long_output: report.long_output.clone(),
            is_acknowledged: entity.is_auto_acknowledge,
        },
    )
    .await?;

    if let Some(raw) = report.perf_data.as_deref() {
        attach_metrics(tx, &livestate, raw).await?;
    }

    Ok(livestate)
}

/// Parse a perf-data string and append its metrics to a livestate.
///
/// Metrics inherit the livestate's timestamp. A malformed token fails
/// the whole call; no partial metric set is recorded.
async fn attach_metrics(
    tx: &mut Transaction<'_, Postgres>,
    livestate: &Livestate,
    raw: &str,
) -> AppResult<()> {
    for parsed in PerfData::new(raw) {
        let metric = parsed?;
        let type_id = metric_type_id(tx, metric.kind).await?;

        LivestateRepo::append_metric(
            tx,
            &CreateMetric {
                livestate_id: livestate.id,
                metric_type_id: type_id,
                name: metric.name,
                value: metric.value,
                timestamp: livestate.timestamp,
            },
        )
        .await?;
    }
    Ok(())
}

/// Resolve a parsed metric kind to its seeded `metric_types` row id.
async fn metric_type_id(
    tx: &mut Transaction<'_, Postgres>,
    kind: MetricKind,
) -> AppResult<i16> {
    let name = kind.name();
    let metric_type = MetricTypeRepo::find_by_name(&mut **tx, name)
        .await?
        .ok_or_else(|| {
            CoreError::Internal(format!("metric type '{name}' is missing from the store"))
        })?;
    Ok(metric_type.id)
}
