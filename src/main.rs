use clap::Parser as _;
use miette::IntoDiagnostic as _;
use tracing::{debug, info};

use scandigest::cli::Cli;
use scandigest::config::Config;
use scandigest::event::TriggerEvent;
use scandigest::github::GithubClient;
use scandigest::github::model::NewIssue;
use scandigest::report::{self, ReportRow};
use scandigest::window;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.token)?;

    println!("event: {}", config.event_name.as_deref().unwrap_or("unknown"));
    println!("event path: {}", config.event_path.display());
    println!("actor: {}", config.actor);

    let event = TriggerEvent::load(&config.event_path)?;

    let since = match event.cron() {
        Some(expr) => {
            let start = window::previous_execution(expr, chrono::Utc::now())?;
            info!(%start, schedule = expr, "reporting dismissals since the previous scheduled run");
            Some(start)
        }
        None => {
            info!("no schedule in trigger event, reporting all dismissals");
            None
        }
    };

    let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;
    runtime.block_on(run(&config, since))
}

async fn run(config: &Config, since: Option<chrono::DateTime<chrono::Utc>>) -> miette::Result<()> {
    let client = GithubClient::new(&config.api_url, &config.token);

    let alerts = client.list_alerts(&config.repository).await?;
    debug!(count = alerts.len(), "fetched code scanning alerts");

    let rows = ReportRow::collect(&alerts, since);

    let issue = NewIssue {
        title: report::issue_title(&config.repository, rows.len()),
        body: report::issue_body(&config.actor, &rows),
    };

    // the outgoing payload is operator-visible before anything is filed
    println!("{}", serde_json::to_string_pretty(&issue).into_diagnostic()?);

    let created = client.create_issue(&config.repository, &issue).await?;

    info!(
        id = created.id,
        state = %created.state,
        title = %created.title,
        "issue created"
    );
    println!("created issue #{}: {}", created.number, created.html_url);

    Ok(())
}
