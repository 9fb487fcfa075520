//! Audit trail for token issuance and event writes, logged on the `audit`
//! tracing target so a subscriber can route it apart from application logs.
//!
//! ```ignore
//! AuditEvent::new("event.update", AuditOutcome::Denied)
//!     .by(&claims.sub)
//!     .on(format!("event:{}", id))
//!     .with_request_headers(&headers)
//!     .log();
//! ```

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    /// Rejected input or bad credentials
    Failure,
    /// Authenticated but not allowed
    Denied,
}

#[derive(Debug, Serialize)]
pub struct AuditEvent {
    pub action: &'static str,
    pub outcome: AuditOutcome,
    /// Account id or attempted login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(action: &'static str, outcome: AuditOutcome) -> Self {
        Self {
            action,
            outcome,
            actor: None,
            resource: None,
            client_ip: None,
            user_agent: None,
            details: None,
            at: Utc::now(),
        }
    }

    pub fn by(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn on(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_request_headers(mut self, headers: &HeaderMap) -> Self {
        self.client_ip = client_ip(headers);
        self.user_agent = header_str(headers, header::USER_AGENT.as_str()).map(str::to_owned);
        self
    }

    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    pub fn log(self) {
        tracing::info!(
            target: "audit",
            action = self.action,
            outcome = ?self.outcome,
            actor = self.actor.as_deref(),
            resource = self.resource.as_deref(),
            client_ip = self.client_ip.as_deref(),
            user_agent = self.user_agent.as_deref(),
            details = self.details.as_ref().map(tracing::field::display),
            at = %self.at.to_rfc3339(),
            "audit"
        );
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// First hop of `X-Forwarded-For`, else `X-Real-IP`.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    header_str(headers, "x-forwarded-for")
        .and_then(|chain| chain.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| header_str(headers, "x-real-ip"))
        .map(str::to_owned)
}
