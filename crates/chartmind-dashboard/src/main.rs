use std::sync::Arc;

use anyhow::Result;
use chartmind_client::{AnalysisBackend, HttpBackend};
use chartmind_dashboard::command::{self, Command};
use chartmind_dashboard::{
    Dashboard, DashboardConfig, DashboardView, NewsPoller, Session, TerminalView, ToastBoard,
};
use tokio::io::{AsyncBufReadExt, BufReader};

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chartmind_dashboard=info,chartmind_client=info".into());

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // Logs go to stderr; stdout belongs to the dashboard.
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env, init tracing
    dotenvy::dotenv().ok();
    init_tracing();

    // 2. Configuration
    let config = DashboardConfig::from_env()?;
    tracing::info!("Starting ChartMind dashboard");
    let http = HttpBackend::new(config.client_config())?;
    tracing::info!("  Backend: {} ({} contract)", http.base_url(), http.contract());
    tracing::info!(
        "  News: every {}s, toast at impact >= {}",
        config.news_poll_interval_seconds,
        config.news_impact_threshold
    );

    // 3. Wire backend, view and session
    let backend: Arc<dyn AnalysisBackend> = Arc::new(http);
    let terminal = Arc::new(TerminalView::new());
    let view: Arc<dyn DashboardView> = terminal.clone();
    let dashboard = Arc::new(Dashboard::new(
        Arc::clone(&backend),
        Arc::clone(&view),
        Arc::new(Session::new()),
    ));

    // 4. News poller lives for the whole session
    let toasts = ToastBoard::new(Arc::clone(&view), config.toast_ttl());
    let poller = NewsPoller::new(
        Arc::clone(&backend),
        Arc::clone(&view),
        toasts,
        config.news_poll_interval(),
        config.news_impact_threshold,
    )
    .start();

    println!("{}", command::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("stdin closed");
                    break;
                };

                match Command::parse(&line) {
                    Command::Analyze(paths) => {
                        let dashboard = Arc::clone(&dashboard);
                        tokio::spawn(async move {
                            // Failures are already shown to the user.
                            let _ = dashboard.upload_and_analyze(&paths).await;
                        });
                    }
                    Command::Feedback(outcome) => {
                        let dashboard = Arc::clone(&dashboard);
                        tokio::spawn(async move {
                            let _ = dashboard.report_feedback(outcome).await;
                        });
                    }
                    Command::News => terminal.print_news(),
                    Command::Help => println!("{}", command::HELP),
                    Command::Quit => break,
                    Command::Empty => {}
                    Command::Unknown(word) => {
                        println!("Unknown command '{}'. Type 'help' for the list.", word);
                    }
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Received SIGINT");
                break;
            }
        }
    }

    poller.stop().await;
    tracing::info!("Dashboard closed");
    Ok(())
}
