use axum::http::HeaderMap;

use donut_domain::RuntimeConfig;

/// Bearer check for the CRUD endpoints. An unset token denies everything.
pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    match &config.api_token {
        Some(api_token) => extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false),
        None => false,
    }
}

/// Slack sends its verification token as a form field, not a header.
pub fn verify_slack_token(config: &RuntimeConfig, token: &str) -> bool {
    match &config.slack_verification_token {
        Some(expected) => !token.is_empty() && token == expected,
        None => false,
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
