use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One code-scanning finding, as returned by the alerts collection endpoint.
/// Fields beyond the dismissal lifecycle are ignored on decode.
#[derive(Debug, Clone, Deserialize)]
pub struct Alert {
    pub number: u64,
    pub state: String,
    pub dismissed_by: Option<Actor>,
    pub dismissed_at: Option<DateTime<Utc>>,
    pub dismissed_reason: Option<String>,
    pub dismissed_comment: Option<String>,
    pub most_recent_instance: Option<AlertInstance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Actor {
    pub login: String,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertInstance {
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub commit_sha: Option<String>,
}

/// Request body for the issue creation endpoint.
#[derive(Debug, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
}

/// The created issue; consumed for operator logging only.
#[derive(Debug, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub state: String,
    pub title: String,
    pub html_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_dismissed_alert() {
        let raw = r#"{
            "number": 42,
            "state": "dismissed",
            "created_at": "2024-05-01T08:00:00Z",
            "url": "https://api.github.com/repos/o/r/code-scanning/alerts/42",
            "dismissed_by": {
                "login": "octocat",
                "id": 1,
                "html_url": "https://github.com/octocat"
            },
            "dismissed_at": "2024-05-14T09:00:00Z",
            "dismissed_reason": "false positive",
            "dismissed_comment": "sanitized upstream",
            "rule": {"id": "js/sql-injection", "severity": "error"},
            "most_recent_instance": {
                "ref": "refs/heads/main",
                "commit_sha": "deadbeef",
                "state": "dismissed"
            }
        }"#;

        let alert: Alert = serde_json::from_str(raw).unwrap();
        assert_eq!(alert.number, 42);
        assert_eq!(alert.state, "dismissed");
        assert_eq!(alert.dismissed_by.unwrap().html_url, "https://github.com/octocat");
        assert_eq!(alert.dismissed_reason.as_deref(), Some("false positive"));
        assert_eq!(
            alert.most_recent_instance.unwrap().git_ref.as_deref(),
            Some("refs/heads/main")
        );
    }

    #[test]
    fn decodes_an_open_alert_with_null_dismissal_fields() {
        let raw = r#"{
            "number": 7,
            "state": "open",
            "dismissed_by": null,
            "dismissed_at": null,
            "dismissed_reason": null,
            "dismissed_comment": null
        }"#;

        let alert: Alert = serde_json::from_str(raw).unwrap();
        assert_eq!(alert.state, "open");
        assert!(alert.dismissed_at.is_none());
        assert!(alert.dismissed_reason.is_none());
        assert!(alert.most_recent_instance.is_none());
    }
}
