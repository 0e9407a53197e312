use indexdash::{DashboardConfig, DashboardController};
use mimalloc::MiMalloc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Terminal host for the dashboard: redraws on every state change, treats each
/// stdin line as a search key, and unmounts on Ctrl-C or end of input.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the rendered dashboard.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "indexdash=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = DashboardConfig::from_env()?;
    tracing::info!(
        base_url = %config.base_url,
        poll_interval_ms = config.poll_interval.as_millis() as u64,
        request_timeout_ms = config.request_timeout.as_millis() as u64,
        "Starting learned-index dashboard"
    );

    let controller = DashboardController::from_config(&config)?;
    tracing::debug!(
        poll_interval_ms = controller.poll_interval().as_millis() as u64,
        "Controller ready"
    );
    let polling = controller.start_polling();

    let renderer = {
        let controller = controller.clone();
        let mut changes = controller.subscribe();
        tokio::spawn(async move {
            print!("{}", controller.view());
            while changes.changed().await.is_ok() {
                print!("\n{}", controller.view());
            }
        })
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(key) => {
                    // Searches run concurrently; only the latest one is applied.
                    let controller = controller.clone();
                    tokio::spawn(async move {
                        controller.submit(key).await;
                    });
                }
                None => break,
            },
            _ = &mut shutdown => break,
        }
    }

    polling.stop();
    renderer.abort();
    tracing::info!("Dashboard unmounted");

    Ok(())
}
