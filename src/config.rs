use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    #[diagnostic(help("the hosted runner exports this automatically, set it by hand for local runs"))]
    MissingVar(&'static str),

    #[error("no API token provided")]
    #[diagnostic(help("set GITHUB_TOKEN or pass --token"))]
    MissingToken,

    #[error("malformed repository identifier {0:?}")]
    #[diagnostic(help("expected the owner/repo form, e.g. octo-org/octo-repo"))]
    MalformedRepository(String),
}

/// Everything the run needs from the environment, resolved once at startup.
/// No other component reads ambient environment state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the event that fired this run, display only.
    pub event_name: Option<String>,

    /// Path of the trigger-event JSON descriptor.
    pub event_path: PathBuf,

    /// Bearer token for both API calls.
    pub token: String,

    /// Repository identifier in owner/repo form.
    pub repository: String,

    /// API base URL, without a trailing slash.
    pub api_url: String,

    /// Actor that triggered the run, display only.
    pub actor: String,
}

impl Config {
    /// Resolve the configuration from the process environment. A token passed
    /// on the command line takes precedence over `GITHUB_TOKEN`.
    pub fn resolve(token_flag: Option<String>) -> Result<Self, ConfigError> {
        let event_path = env_var("GITHUB_EVENT_PATH")
            .ok_or(ConfigError::MissingVar("GITHUB_EVENT_PATH"))?;

        let token = token_flag
            .filter(|token| !token.is_empty())
            .or_else(|| env_var("GITHUB_TOKEN"))
            .ok_or(ConfigError::MissingToken)?;

        let repository =
            env_var("GITHUB_REPOSITORY").ok_or(ConfigError::MissingVar("GITHUB_REPOSITORY"))?;
        validate_repository(&repository)?;

        let api_url = env_var("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            event_name: env_var("GITHUB_EVENT_NAME"),
            event_path: PathBuf::from(event_path),
            token,
            repository,
            api_url: api_url.trim_end_matches('/').to_string(),
            actor: env_var("GITHUB_ACTOR").unwrap_or_default(),
        })
    }
}

fn validate_repository(repository: &str) -> Result<(), ConfigError> {
    let malformed = || ConfigError::MalformedRepository(repository.to_string());

    let (owner, name) = repository.split_once('/').ok_or_else(malformed)?;

    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return Err(malformed());
    }

    Ok(())
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_owner_repo_identifiers() {
        assert!(validate_repository("octo-org/octo-repo").is_ok());
        assert!(validate_repository("a/b").is_ok());
    }

    #[test]
    fn rejects_identifiers_without_a_slash() {
        assert!(matches!(
            validate_repository("octo-repo"),
            Err(ConfigError::MalformedRepository(_))
        ));
    }

    #[test]
    fn rejects_empty_halves_and_extra_segments() {
        assert!(validate_repository("/octo-repo").is_err());
        assert!(validate_repository("octo-org/").is_err());
        assert!(validate_repository("octo-org/octo/repo").is_err());
    }
}
