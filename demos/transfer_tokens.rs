//! Network communication requires `http` crate feature.
//!
//! Requests testnet tokens from a faucet (if `CW_FAUCET_URL` is set) and
//! sends them to `TEST_TO_ADDRESS`.

use std::time::Duration;

use cw_devkit::client::SigningClient;
use cw_devkit::config::ClientConfig;
use cw_devkit::faucet::request_tokens;
use cw_devkit::{AccountAddress, Coin, Result};

async fn transfer_tokens() -> Result<()> {
    let config = ClientConfig::juno_testnet().with_env_overrides();
    let client = SigningClient::from_config(&config).await?;
    let denom = ClientConfig::JUNO_TESTNET_DENOM;
    let recipient: AccountAddress = std::env::var("TEST_TO_ADDRESS")
        .map_err(|_| cw_devkit::Error::Config("TEST_TO_ADDRESS must be provided".to_string()))?
        .parse()?;

    if let Some(faucet_url) = &config.faucet_url {
        request_tokens(faucet_url, client.address(), denom).await?;
        tokio::time::sleep(Duration::from_secs(10)).await;
    }
    println!("Sending from {} to {}", client.address(), recipient);
    println!(
        "Balances before: {}, {}",
        client.get_balance(client.address(), denom).await?,
        client.get_balance(&recipient, denom).await?
    );
    let result = client
        .send_tokens(client.address(), &recipient, vec![Coin::new(1000000, denom)])
        .await?;
    println!("Transaction {} included into block {}", result.hash, result.height);
    println!(
        "Balances after: {}, {}",
        client.get_balance(client.address(), denom).await?,
        client.get_balance(&recipient, denom).await?
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = transfer_tokens().await {
        eprintln!("Transfer failed ({:?}): {e}", e.kind());
        std::process::exit(1);
    }
}
