//! Example: Futures open interest for the last few days.
//!
//! Run with: cargo run --example futoi
//!
//! Without a paid subscription the data is delayed by 14 days.

use moex_api_client::MoexClient;
use moex_api_client::types::{MOSCOW_OFFSET, moscow_today};
use time::Duration;
use time::macros::format_description;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::OffsetTime;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    let timer = OffsetTime::new(
        MOSCOW_OFFSET,
        format_description!("[day].[month].[year] [hour]:[minute]:[second]"),
    );
    tracing_subscriber::fmt()
        .with_timer(timer)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut builder = MoexClient::builder();
    if let Ok(token) = std::env::var("MOEX_TOKEN") {
        builder = builder.token(token);
    }
    let client = builder.build();

    let ticker = "IMOEXF";
    let till = moscow_today();
    let from = till - Duration::days(3);

    let Some(futoi) = client.get_futoi(ticker, from, till).await else {
        info!("FUTOI not received");
        return Ok(());
    };

    let rows = futoi.rows("futoi");
    if rows.is_empty() {
        info!("FUTOI not received");
    } else {
        info!("FUTOI values received: {}", rows.len());
        for row in rows {
            info!("{row:?}");
        }
    }

    Ok(())
}
