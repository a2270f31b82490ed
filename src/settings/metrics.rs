use std::env;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

pub const SEND_METRICS_ENV_VAR: &str = "WRANGLER_SEND_METRICS";

// Header names are case-insensitive on the wire; `HeaderName` stores them lowercased.
const METRICS_ENABLED_HEADER: &str = "metricsenabled";

/// Whether usage metrics are enabled for this invocation.
///
/// An explicit flag wins, then `WRANGLER_SEND_METRICS`, otherwise disabled.
pub fn metrics_enabled(send_metrics: Option<bool>) -> bool {
    send_metrics.unwrap_or_else(|| {
        env::var(SEND_METRICS_ENV_VAR)
            .map(|value| parse_flag(&value))
            .unwrap_or(false)
    })
}

pub fn usage_headers(send_metrics: Option<bool>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let enabled = if metrics_enabled(send_metrics) {
        "true"
    } else {
        "false"
    };
    headers.insert(
        HeaderName::from_static(METRICS_ENABLED_HEADER),
        HeaderValue::from_static(enabled),
    );
    headers
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
