//! Network communication requires `http` crate feature.
//!
//! End-to-end walk through the entries contract on a live chain.
//!
//! Configuration comes from `CW_*` variables (see [`ClientConfig`]). The
//! contract is uploaded from `CW_WASM_PATH`, or an existing deployment is
//! reused when `CW_CONTRACT` and `CW_CODE_ID` are set. Logs are controlled
//! by `RUST_LOG`, e.g. `RUST_LOG=cw_devkit=debug`.

use std::sync::Arc;

use cw_devkit::client::SigningClient;
use cw_devkit::config::ClientConfig;
use cw_devkit::contract::{ContractGateway, ContractRef};
use cw_devkit::msg::{InstantiateMsg, Priority, Status};
use cw_devkit::{Coin, Error, Result};
use tracing_subscriber::EnvFilter;

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

async fn deploy(client: Arc<SigningClient>) -> Result<ContractGateway> {
    if let (Some(address), Some(code_id)) = (env("CW_CONTRACT"), env("CW_CODE_ID")) {
        let contract = ContractRef {
            code_id: code_id
                .parse()
                .map_err(|_| Error::Config(format!("bad CW_CODE_ID {code_id:?}")))?,
            address: address.parse()?,
        };
        return Ok(ContractGateway::at(client, contract));
    }
    let path = env("CW_WASM_PATH")
        .ok_or_else(|| Error::Config("set CW_WASM_PATH or CW_CONTRACT with CW_CODE_ID".to_string()))?;
    let wasm = std::fs::read(&path).map_err(|e| Error::Config(format!("{path}: {e}")))?;

    let owner = client.address().to_string();
    let mut gateway = ContractGateway::new(client);
    let code_id = gateway.upload(wasm).await?;
    println!("Uploaded code {code_id}");
    let contract = gateway
        .instantiate(&InstantiateMsg { owner: Some(owner) }, "messages", None)
        .await?;
    println!("Instantiated {}", contract.address);
    Ok(gateway)
}

async fn run_scenario() -> Result<()> {
    let config = ClientConfig::juno_testnet().with_env_overrides();
    let client = Arc::new(SigningClient::from_config(&config).await?);
    let denom = ClientConfig::JUNO_TESTNET_DENOM;
    println!("Wallet {}", client.address());
    println!(
        "Balance {}",
        client.get_balance(client.address(), denom).await?
    );

    let mut gateway = deploy(client)
        .await?
        .with_funds(vec![Coin::new(10000, denom)]);
    gateway.ready().await?;

    let first = gateway.new_entry("First entry", Priority::Low).await?;
    println!("Created {first:?}");
    let second = gateway.new_entry("Second entry", Priority::Medium).await?;
    println!("Created {second:?}");
    println!("Entry {}: {:?}", first.id, gateway.get_entry(first.id).await?);

    let updated = gateway
        .update_entry(
            second.id,
            Some("Second entry - finished"),
            Some(Status::Done),
            None,
        )
        .await?;
    println!("Updated {updated:?}");

    let deleted = gateway.delete_entry(first.id).await?;
    println!("Deleted entry {} in {}", first.id, deleted.hash);

    let entries = gateway.list_entries(Some(0), None).await?;
    println!("Remaining entries: {entries:#?}");
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    if let Err(e) = run_scenario().await {
        eprintln!("Scenario failed ({:?}): {e}", e.kind());
        std::process::exit(1);
    }
}
