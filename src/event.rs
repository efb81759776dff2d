//! Trigger event reading
//!
//! The hosted runner drops a JSON descriptor of the triggering event at the
//! path named by `GITHUB_EVENT_PATH`. The only field this tool consumes is
//! the cron `schedule` of scheduled runs; everything else is ignored.

use std::path::Path;

use miette::{Context as _, IntoDiagnostic as _};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct TriggerEvent {
    pub schedule: Option<String>,
}

impl TriggerEvent {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("reading trigger event {}", path.display()))?;

        serde_json::from_str(&contents)
            .into_diagnostic()
            .with_context(|| format!("decoding trigger event {}", path.display()))
    }

    /// The cron expression that fired this run. An absent or blank field
    /// means the run was not scheduled and no reporting window applies.
    pub fn cron(&self) -> Option<&str> {
        self.schedule
            .as_deref()
            .map(str::trim)
            .filter(|schedule| !schedule.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_schedule_field() {
        let event: TriggerEvent = serde_json::from_str(r#"{"schedule": "0 * * * *"}"#).unwrap();
        assert_eq!(event.cron(), Some("0 * * * *"));
    }

    #[test]
    fn ignores_unrelated_fields() {
        let event: TriggerEvent =
            serde_json::from_str(r#"{"schedule": "0 0 * * *", "ref": "main", "workflow": "x"}"#)
                .unwrap();
        assert_eq!(event.cron(), Some("0 0 * * *"));
    }

    #[test]
    fn missing_or_blank_schedule_means_no_window() {
        let event: TriggerEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(event.cron(), None);

        let event: TriggerEvent = serde_json::from_str(r#"{"schedule": ""}"#).unwrap();
        assert_eq!(event.cron(), None);

        let event: TriggerEvent = serde_json::from_str(r#"{"schedule": "  "}"#).unwrap();
        assert_eq!(event.cron(), None);
    }

    #[test]
    fn load_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TriggerEvent::load(&dir.path().join("event.json"));
        assert!(result.is_err());
    }

    #[test]
    fn load_fails_on_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(TriggerEvent::load(&path).is_err());
    }

    #[test]
    fn load_reads_event_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, r#"{"schedule": "*/15 * * * *"}"#).unwrap();

        let event = TriggerEvent::load(&path).unwrap();
        assert_eq!(event.cron(), Some("*/15 * * * *"));
    }
}
