//! Raw REST client for the two API calls this tool makes

use miette::{Context as _, IntoDiagnostic as _};
use reqwest::header::ACCEPT;
use tracing::{debug, info};

pub mod model;

use model::{Alert, Issue, NewIssue};

const API_MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GithubClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Fetch the repository's code-scanning alerts. A transport failure or
    /// non-2xx status is fatal: filing an empty report after a failed fetch
    /// would claim there were no dismissals.
    pub async fn list_alerts(&self, repository: &str) -> miette::Result<Vec<Alert>> {
        let url = format!("{}/repos/{}/code-scanning/alerts", self.base_url, repository);
        debug!(%url, "listing code scanning alerts");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, API_MEDIA_TYPE)
            .header(API_VERSION_HEADER, API_VERSION)
            .send()
            .await
            .into_diagnostic()
            .context("requesting code scanning alerts")?;

        let status = response.status();
        info!(%status, "code scanning alerts response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            miette::bail!("listing code scanning alerts failed with {status}: {body}");
        }

        response
            .json::<Vec<Alert>>()
            .await
            .into_diagnostic()
            .context("decoding code scanning alerts")
    }

    /// File the summary issue. Fatal on failure, the report would otherwise
    /// be lost silently.
    pub async fn create_issue(&self, repository: &str, issue: &NewIssue) -> miette::Result<Issue> {
        let url = format!("{}/repos/{}/issues", self.base_url, repository);
        debug!(%url, title = %issue.title, "creating issue");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, API_MEDIA_TYPE)
            .header(API_VERSION_HEADER, API_VERSION)
            .json(issue)
            .send()
            .await
            .into_diagnostic()
            .context("creating summary issue")?;

        let status = response.status();
        info!(%status, "issue creation response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            miette::bail!("creating summary issue failed with {status}: {body}");
        }

        response
            .json::<Issue>()
            .await
            .into_diagnostic()
            .context("decoding created issue")
    }
}
