use chrono::Datelike;
use rusty_tennis::args;
use rusty_tennis::model::QueryKind;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = args::args_checks()?;

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupted, finishing with what we have");
            on_ctrl_c.cancel();
        }
    });

    let orchestrator = config.orchestrator(cancel)?;
    let records = match (config.query, config.date) {
        (QueryKind::ByDate, Some(date)) => {
            orchestrator
                .fetch_by_date(date.day(), date.month(), date.year())
                .await
        }
        (QueryKind::Upcoming, _) => orchestrator.fetch_upcoming().await,
        (QueryKind::Live | QueryKind::ByDate, _) => orchestrator.fetch_live().await,
    };

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
