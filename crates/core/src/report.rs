//! Wire types for passive monitoring reports and ingestion feedback.
//!
//! Field names are part of the external protocol and must not change:
//! reporters send `passive_checks_enabled`, `template._realm`,
//! `livestate.perf_data`, and a `services` array, and expect feedback
//! with `check_interval` / `freshness_threshold` keys.

use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::Timestamp;

/// One pushed host report: the host itself plus nested service reports.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct HostReport {
    /// Host entity name. May be omitted in the body when the transport
    /// already names the host (e.g. in the request path).
    #[serde(default)]
    #[validate(length(min = 1, message = "host name must not be empty"))]
    pub name: String,

    /// Whether passive checks are enabled for this host. Maps onto the
    /// entity's `is_monitored` flag at creation time.
    #[serde(default)]
    pub passive_checks_enabled: bool,

    /// Optional template block carrying the declared realm.
    #[serde(default)]
    pub template: Option<TemplateHint>,

    /// Current host status snapshot, if the reporter attached one.
    #[serde(default)]
    pub livestate: Option<LivestateReport>,

    /// Service reports nested under this host.
    #[serde(default)]
    #[validate(nested)]
    pub services: Vec<ServiceReport>,
}

impl HostReport {
    /// The realm declared in the report's template block, if any.
    pub fn realm_hint(&self) -> Option<&str> {
        self.template
            .as_ref()
            .and_then(|t| t.realm.as_deref())
            .filter(|r| !r.is_empty())
    }
}

/// Template block of a host report. Only the realm is meaningful here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateHint {
    #[serde(rename = "_realm")]
    pub realm: Option<String>,
}

/// One nested service report.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServiceReport {
    /// Service name local to the host (not yet host-qualified).
    #[validate(length(min = 1, message = "service name must not be empty"))]
    pub name: String,

    #[serde(default)]
    pub passive_checks_enabled: bool,

    #[serde(default)]
    pub livestate: Option<LivestateReport>,
}

/// A status snapshot carried inside a host or service report.
#[derive(Debug, Clone, Deserialize)]
pub struct LivestateReport {
    /// Unix timestamp (seconds) of the observation. Defaults to the
    /// ingestion wall-clock time when omitted.
    #[serde(default)]
    pub timestamp: Option<i64>,

    /// Reported state name (e.g. `UP`, `CRITICAL`). Resolved against the
    /// seeded state directory, case-sensitively.
    pub state: String,

    #[serde(default)]
    pub output: Option<String>,

    #[serde(default)]
    pub long_output: Option<String>,

    /// Raw perf-data string, parsed by [`crate::perfdata`].
    #[serde(default)]
    pub perf_data: Option<String>,
}

impl LivestateReport {
    /// Convert the wire timestamp to UTC, or `None` when absent.
    ///
    /// An epoch value outside chrono's representable range is a client
    /// fault, not a server one.
    pub fn timestamp_utc(&self) -> Result<Option<Timestamp>, CoreError> {
        match self.timestamp {
            None => Ok(None),
            Some(secs) => chrono::Utc
                .timestamp_opt(secs, 0)
                .single()
                .map(Some)
                .ok_or_else(|| {
                    CoreError::Validation(format!("timestamp {secs} is out of range"))
                }),
        }
    }
}

/// Feedback returned to the reporter after a successful ingestion.
///
/// Echoes the host entity's configured intervals so the reporter can
/// adjust its push cadence. `active_check_enabled` is always `false`:
/// this server only accepts passive reports.
#[derive(Debug, Clone, Serialize)]
pub struct HostFeedback {
    pub check_interval: i32,
    pub freshness_threshold: i32,
    pub passive_check_enabled: bool,
    pub active_check_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_report() {
        let json = serde_json::json!({
            "name": "host1",
            "passive_checks_enabled": true,
            "template": { "_realm": "dc1" },
            "livestate": { "state": "UP", "output": "ok" },
            "services": [
                { "name": "svc1", "livestate": { "state": "OK", "perf_data": "'cpu'=10c" } }
            ]
        });

        let report: HostReport = serde_json::from_value(json).unwrap();
        assert_eq!(report.name, "host1");
        assert!(report.passive_checks_enabled);
        assert_eq!(report.realm_hint(), Some("dc1"));
        assert_eq!(report.livestate.as_ref().unwrap().state, "UP");
        assert_eq!(report.services.len(), 1);
        assert_eq!(
            report.services[0].livestate.as_ref().unwrap().perf_data.as_deref(),
            Some("'cpu'=10c")
        );
    }

    #[test]
    fn minimal_report_defaults() {
        let report: HostReport = serde_json::from_value(serde_json::json!({
            "name": "bare"
        }))
        .unwrap();
        assert!(!report.passive_checks_enabled);
        assert!(report.template.is_none());
        assert!(report.livestate.is_none());
        assert!(report.services.is_empty());
    }

    #[test]
    fn empty_realm_hint_is_ignored() {
        let report: HostReport = serde_json::from_value(serde_json::json!({
            "name": "h",
            "template": { "_realm": "" }
        }))
        .unwrap();
        assert_eq!(report.realm_hint(), None);
    }

    #[test]
    fn empty_host_name_fails_validation() {
        let report = HostReport::default();
        assert!(validator::Validate::validate(&report).is_err());
    }

    #[test]
    fn empty_service_name_fails_validation() {
        let report: HostReport = serde_json::from_value(serde_json::json!({
            "name": "h",
            "services": [{ "name": "" }]
        }))
        .unwrap();
        assert!(validator::Validate::validate(&report).is_err());
    }

    #[test]
    fn wire_timestamp_converts_to_utc() {
        let ls: LivestateReport = serde_json::from_value(serde_json::json!({
            "state": "UP",
            "timestamp": 1_700_000_000
        }))
        .unwrap();
        let ts = ls.timestamp_utc().unwrap().unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
    }

    #[test]
    fn absent_timestamp_is_none() {
        let ls: LivestateReport =
            serde_json::from_value(serde_json::json!({ "state": "UP" })).unwrap();
        assert_eq!(ls.timestamp_utc().unwrap(), None);
    }
}
