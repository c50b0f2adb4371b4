//! Helpers shared by command-dispatch realizations

use std::time::Duration;

use chrono::Utc;
use omnia_core::Payload;
use serde_json::{json, Value};

use crate::identity::Identity;

/// Config key holding an artificial delay, in milliseconds
pub const SIMULATED_LATENCY_KEY: &str = "simulated_latency_ms";

/// The `command` input, or `""`
pub(crate) fn command(inputs: &Payload) -> &str {
    str_field(inputs, "command", "")
}

/// The `params` input object, or an empty map
pub(crate) fn params(inputs: &Payload) -> Payload {
    inputs
        .get("params")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

pub(crate) fn str_field<'a>(map: &'a Payload, key: &str, default: &'a str) -> &'a str {
    map.get(key).and_then(Value::as_str).unwrap_or(default)
}

pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Convert a `json!` object literal into a payload
pub(crate) fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        _ => Payload::new(),
    }
}

/// Normal (non-failing) response for a command outside the known set
pub(crate) fn unknown_command(command: &str) -> Payload {
    payload(json!({
        "status": "error",
        "error": format!("Unknown command: {}", command),
        "timestamp": timestamp(),
    }))
}

/// Sleep for the configured simulated latency, if any
pub(crate) async fn simulate_latency(identity: &Identity) {
    if let Some(ms) = identity.config_u64(SIMULATED_LATENCY_KEY).filter(|ms| *ms > 0) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back() {
        let inputs = Payload::new();
        assert_eq!(command(&inputs), "");
        assert!(params(&inputs).is_empty());
    }

    #[test]
    fn test_non_string_command_is_empty() {
        let inputs = payload(json!({ "command": 42, "params": "nope" }));
        assert_eq!(command(&inputs), "");
        assert!(params(&inputs).is_empty());
    }

    #[test]
    fn test_unknown_command_payload() {
        let response = unknown_command("frobnicate");
        assert_eq!(response["status"], "error");
        assert_eq!(response["error"], "Unknown command: frobnicate");
        assert!(response["timestamp"].is_string());
    }
}
