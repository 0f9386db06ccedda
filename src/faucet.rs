//! Testnet faucet access.

use serde::Serialize;
use tracing::info;

use crate::address::AccountAddress;
use crate::error::{Error, Result};

#[derive(Serialize)]
struct FaucetRequest<'a> {
    denom: &'a str,
    address: &'a str,
}

pub async fn request_tokens(faucet_url: &str, address: &AccountAddress, denom: &str) -> Result<()> {
    //! Ask a CosmJS-style faucet to fund `address` with `denom`.
    //!
    //! Succeeds once the faucet accepted the request; the transfer itself
    //! lands asynchronously, so poll the balance afterwards.
    let response = reqwest::Client::new()
        .post(faucet_url)
        .json(&FaucetRequest {
            denom,
            address: address.as_str(),
        })
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::BroadcastRejected {
            code: u32::from(status.as_u16()),
            codespace: "faucet".to_string(),
            log: body,
        });
    }
    info!(%address, denom, "faucet request accepted");
    Ok(())
}
