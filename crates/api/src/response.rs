//! Wire-protocol response envelope.
//!
//! Reporters speak the Alignak web-service envelope: every response
//! carries a `_status` of `"OK"` or `"ERR"`, with the payload under
//! `_result` (commands such as login) or `_feedback` (data responses),
//! and error details under `_issues`.

use serde::Serialize;

/// Successful response envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    #[serde(rename = "_status")]
    pub status: &'static str,

    #[serde(rename = "_result", skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,

    #[serde(rename = "_feedback", skip_serializing_if = "Option::is_none")]
    pub feedback: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// `{"_status": "OK", "_feedback": payload}`
    pub fn feedback(payload: T) -> Self {
        Self {
            status: "OK",
            result: None,
            feedback: Some(payload),
        }
    }

    /// `{"_status": "OK", "_result": payload}`
    pub fn result(payload: T) -> Self {
        Self {
            status: "OK",
            result: Some(payload),
            feedback: None,
        }
    }
}

/// Error response envelope, emitted by the [`crate::error`] layer.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    #[serde(rename = "_status")]
    pub status: &'static str,

    #[serde(rename = "_issues")]
    pub issues: Vec<String>,
}

impl ErrorEnvelope {
    pub fn new(issue: String) -> Self {
        Self {
            status: "ERR",
            issues: vec![issue],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_envelope_shape() {
        let json = serde_json::to_value(Envelope::feedback(serde_json::json!({"k": 1}))).unwrap();
        assert_eq!(json["_status"], "OK");
        assert_eq!(json["_feedback"]["k"], 1);
        assert!(json.get("_result").is_none());
        assert!(json.get("_issues").is_none());
    }

    #[test]
    fn result_envelope_shape() {
        let json = serde_json::to_value(Envelope::result(vec!["token".to_string()])).unwrap();
        assert_eq!(json["_status"], "OK");
        assert_eq!(json["_result"][0], "token");
        assert!(json.get("_feedback").is_none());
    }

    #[test]
    fn error_envelope_shape() {
        let json = serde_json::to_value(ErrorEnvelope::new("boom".into())).unwrap();
        assert_eq!(json["_status"], "ERR");
        assert_eq!(json["_issues"][0], "boom");
    }
}
