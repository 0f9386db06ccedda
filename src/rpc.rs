//! CometBFT JSON-RPC transport over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use rustc_hex::ToHex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::network::{Event, LedgerTransport, TxResult};
use crate::utils::{decode_hex, tx_hash};

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: Value,
}

#[serde_with::serde_as]
#[derive(Serialize)]
struct TxParams<'a> {
    #[serde_as(as = "serde_with::base64::Base64")]
    tx: &'a [u8],
}

#[serde_with::serde_as]
#[derive(Serialize)]
struct TxQueryParams<'a> {
    #[serde_as(as = "serde_with::base64::Base64")]
    hash: &'a [u8],
    prove: bool,
}

#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<String>,
}

impl std::fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)?;
        if let Some(data) = &self.data {
            write!(f, ": {data}")?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct NodeInfo {
    network: String,
}

#[derive(Deserialize)]
struct StatusResponse {
    node_info: NodeInfo,
}

#[serde_with::serde_as]
#[derive(Deserialize)]
struct AbciQueryResult {
    #[serde(default)]
    code: u32,
    #[serde(default)]
    log: String,
    #[serde(default)]
    codespace: String,
    #[serde_as(as = "Option<serde_with::base64::Base64>")]
    value: Option<Vec<u8>>,
}

#[derive(Deserialize)]
struct AbciQueryResponse {
    response: AbciQueryResult,
}

#[derive(Deserialize)]
struct BroadcastSyncResponse {
    #[serde(default)]
    code: u32,
    #[serde(default)]
    log: String,
    #[serde(default)]
    codespace: String,
    #[serde(default)]
    hash: String,
}

#[serde_with::serde_as]
#[derive(Deserialize)]
struct ExecTxResult {
    #[serde(default)]
    code: u32,
    #[serde(default)]
    log: String,
    #[serde(default)]
    codespace: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    #[serde(default)]
    gas_wanted: u64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    #[serde(default)]
    gas_used: u64,
    #[serde(default)]
    events: Vec<Event>,
}

#[serde_with::serde_as]
#[derive(Deserialize)]
struct TxResponse {
    hash: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    height: u64,
    tx_result: ExecTxResult,
}

impl From<TxResponse> for TxResult {
    fn from(response: TxResponse) -> Self {
        let TxResponse {
            hash,
            height,
            tx_result,
        } = response;
        Self {
            hash,
            height,
            code: tx_result.code,
            codespace: tx_result.codespace,
            raw_log: tx_result.log,
            gas_wanted: tx_result.gas_wanted,
            gas_used: tx_result.gas_used,
            events: tx_result.events,
        }
    }
}

/// A simple JSON-RPC client for a CometBFT node.
#[derive(Clone, Debug)]
pub struct RpcNode {
    /// RPC base url
    pub base_url: Url,
    /// How long to wait for a broadcast transaction to land in a block
    pub broadcast_timeout: Duration,
    /// Delay between inclusion checks
    pub poll_interval: Duration,
    client: Client,
    chain_id: OnceCell<String>,
}

impl RpcNode {
    pub fn new(endpoint: &str) -> Result<Self> {
        //! Create a client without contacting the node.
        let base_url = endpoint
            .parse()
            .map_err(|e| Error::Config(format!("invalid RPC endpoint {endpoint:?}: {e}")))?;
        Ok(Self {
            base_url,
            broadcast_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_secs(3),
            client: Client::new(),
            chain_id: OnceCell::new(),
        })
    }

    pub async fn connect(endpoint: &str) -> Result<Self> {
        //! Create a client and make sure the node answers.
        let node = Self::new(endpoint)?;
        let chain_id = node.chain_id().await?;
        info!(%chain_id, endpoint, "connected to node");
        Ok(node)
    }

    #[must_use]
    pub fn with_timeouts(mut self, broadcast_timeout: Duration, poll_interval: Duration) -> Self {
        //! Set inclusion wait parameters.
        self.broadcast_timeout = broadcast_timeout;
        self.poll_interval = poll_interval;
        self
    }

    #[must_use]
    pub fn with_chain_id(self, chain_id: &str) -> Self {
        //! Use a known chain id instead of asking the node.
        let _ = self.chain_id.set(chain_id.to_string());
        self
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<std::result::Result<T, JsonRpcError>> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: rand::random(),
            method,
            params,
        };
        let response = self
            .client
            .post(self.base_url.clone())
            .json(&request)
            .send()
            .await?
            .text()
            .await?;
        let decoded: JsonRpcResponse<T> = serde_json::from_str(&response)
            .map_err(|_| Error::Unreachable(format!("unexpected response to {method}: {response}")))?;
        match (decoded.result, decoded.error) {
            (_, Some(error)) => Ok(Err(error)),
            (Some(result), None) => Ok(Ok(result)),
            (None, None) => Err(Error::Decode(format!("empty response to {method}"))),
        }
    }

    pub async fn fetch_transaction(&self, hash: &str) -> Result<Option<TxResult>> {
        //! Retrieve an included transaction by its hex hash.
        //!
        //! Returns [`None`] for transactions not (yet) in a block.
        let hash_bytes = decode_hex(hash).map_err(|e| Error::Decode(e.to_string()))?;
        let params = serde_json::to_value(TxQueryParams {
            hash: &hash_bytes,
            prove: false,
        })?;
        match self.call::<TxResponse>("tx", params).await? {
            Ok(response) => Ok(Some(response.into())),
            Err(error) => {
                debug!(%hash, %error, "transaction not found yet");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl LedgerTransport for RpcNode {
    async fn chain_id(&self) -> Result<String> {
        self.chain_id
            .get_or_try_init(|| async {
                let status: StatusResponse = self
                    .call("status", json!({}))
                    .await?
                    .map_err(|e| Error::Unreachable(e.to_string()))?;
                Ok(status.node_info.network)
            })
            .await
            .cloned()
    }

    async fn broadcast(&self, tx_bytes: Vec<u8>) -> Result<TxResult> {
        let params = serde_json::to_value(TxParams { tx: &tx_bytes })?;
        let checked: BroadcastSyncResponse = self
            .call("broadcast_tx_sync", params)
            .await?
            .map_err(|e| Error::BroadcastRejected {
                code: 0,
                codespace: String::new(),
                log: e.to_string(),
            })?;
        if checked.code != 0 {
            return Err(Error::BroadcastRejected {
                code: checked.code,
                codespace: checked.codespace,
                log: checked.log,
            });
        }
        let hash = if checked.hash.is_empty() {
            tx_hash(&tx_bytes)
        } else {
            checked.hash
        };
        debug!(%hash, "transaction accepted to mempool");

        // Past this point the transaction may land in a block at any time:
        // every failure is reported as a timeout carrying the hash.
        let deadline = tokio::time::Instant::now() + self.broadcast_timeout;
        loop {
            let polled = tokio::time::timeout_at(deadline, self.fetch_transaction(&hash)).await;
            match polled {
                Ok(Ok(Some(result))) => {
                    info!(hash = %result.hash, height = result.height, code = result.code, "transaction included");
                    return Ok(result);
                }
                Ok(Ok(None)) => {}
                Ok(Err(error)) => warn!(%hash, %error, "inclusion check failed"),
                Err(_) => return Err(Error::Timeout { hash }),
            }
            if tokio::time::Instant::now() + self.poll_interval > deadline {
                return Err(Error::Timeout { hash });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn abci_query(&self, path: &str, data: Vec<u8>) -> Result<Vec<u8>> {
        debug!(path, "abci query");
        let response: AbciQueryResponse = self
            .call(
                "abci_query",
                json!({"path": path, "data": data.to_hex::<String>(), "prove": false}),
            )
            .await?
            .map_err(|e| Error::QueryRejected {
                code: 0,
                codespace: String::new(),
                log: e.to_string(),
            })?;
        let result = response.response;
        if result.code != 0 {
            return Err(Error::QueryRejected {
                code: result.code,
                codespace: result.codespace,
                log: result.log,
            });
        }
        Ok(result.value.unwrap_or_default())
    }
}
