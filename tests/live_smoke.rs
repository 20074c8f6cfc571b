use moex_api_client::MoexClient;
use moex_api_client::types::{Market, moscow_today};

fn live_tests_enabled() -> bool {
    std::env::var("MOEX_LIVE_TESTS").ok().as_deref() == Some("1")
}

fn live_client() -> Option<MoexClient> {
    let token = std::env::var("MOEX_TOKEN").ok()?;
    Some(MoexClient::builder().without_secret_store().token(token).build())
}

#[tokio::test]
#[ignore]
async fn live_ticker_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    let Some(client) = live_client() else {
        return Ok(());
    };

    let ticker = client.try_get_ticker(Market::Shares, "SBER").await?;
    let ticker = ticker.ok_or("no data for SBER")?;
    assert!(ticker.dataset("securities").is_some());
    assert!(ticker.dataset("marketdata").is_some());

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_futoi_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    let Some(client) = live_client() else {
        return Ok(());
    };

    let till = moscow_today();
    let from = till - time::Duration::days(3);
    let futoi = client.try_get_futoi("IMOEXF", from, till).await?;
    assert!(futoi.is_some_and(|f| f.dataset("futoi").is_some()));

    Ok(())
}
