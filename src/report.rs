//! Dismissal filtering and report rendering
//!
//! An alert qualifies for the report when it is dismissed, carries a
//! non-empty dismissal reason, and was dismissed at or after the window
//! start. Rows keep the order the API returned them in.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::github::model::Alert;

const DISMISSED_STATE: &str = "dismissed";

const TABLE_HEADER: &str =
    "| Number | Dismissed reason | Dismissed by | Dismissed at | Dismissed Comment | Ref |";
const TABLE_SEPARATOR: &str = "|---|---|---|---|---|---|";

/// One line of the summary table, derived from a qualifying alert.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub number: u64,
    pub reason: String,
    pub actor_url: String,
    pub dismissed_at: Option<DateTime<Utc>>,
    pub comment: String,
    pub git_ref: String,
}

impl ReportRow {
    /// Derive the report rows from the fetched alerts, preserving API order.
    /// `since` is the inclusive window start; `None` means no restriction.
    pub fn collect(alerts: &[Alert], since: Option<DateTime<Utc>>) -> Vec<ReportRow> {
        alerts
            .iter()
            .filter(|alert| qualifies(alert, since))
            .map(ReportRow::from_alert)
            .collect()
    }

    fn from_alert(alert: &Alert) -> Self {
        Self {
            number: alert.number,
            reason: alert.dismissed_reason.clone().unwrap_or_default(),
            actor_url: alert
                .dismissed_by
                .as_ref()
                .map(|actor| actor.html_url.clone())
                .unwrap_or_default(),
            dismissed_at: alert.dismissed_at,
            comment: alert.dismissed_comment.clone().unwrap_or_default(),
            git_ref: alert
                .most_recent_instance
                .as_ref()
                .and_then(|instance| instance.git_ref.clone())
                .unwrap_or_default(),
        }
    }
}

fn qualifies(alert: &Alert, since: Option<DateTime<Utc>>) -> bool {
    if alert.state != DISMISSED_STATE {
        return false;
    }

    let has_reason = alert
        .dismissed_reason
        .as_deref()
        .is_some_and(|reason| !reason.is_empty());

    if !has_reason {
        return false;
    }

    match since {
        None => true,
        // inclusive lower bound; an alert without a timestamp cannot be
        // placed inside the window
        Some(start) => alert.dismissed_at.is_some_and(|at| at >= start),
    }
}

pub fn issue_title(repository: &str, count: usize) -> String {
    format!("Security Alert Aggregation for {repository} ({count})")
}

/// Render the issue body. The table header and separator are always present,
/// a zero-row report is still a valid table.
pub fn issue_body(actor: &str, rows: &[ReportRow]) -> String {
    let mut body = String::new();

    body.push_str("# Security Alert Aggregation\n\n");
    body.push_str(&format!(
        "The number of security alerts for user {} and reason false positive is {}\n\n",
        actor,
        rows.len()
    ));
    body.push_str(TABLE_HEADER);
    body.push('\n');
    body.push_str(TABLE_SEPARATOR);
    body.push('\n');

    for row in rows {
        let dismissed_at = row
            .dismissed_at
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default();

        body.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            row.number, row.reason, row.actor_url, dismissed_at, row.comment, row.git_ref
        ));
    }

    body
}
