//! Signing client: one key, one ledger, serialized submissions.

use std::sync::Arc;

use cosmos_sdk_proto::cosmos::bank::v1beta1::{QueryBalanceRequest, QueryBalanceResponse};
use cosmos_sdk_proto::cosmwasm::wasm::v1::{
    QueryContractInfoRequest, QueryContractInfoResponse, QuerySmartContractStateRequest,
    QuerySmartContractStateResponse,
};
use prost::Message;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::address::AccountAddress;
use crate::coin::{Coin, GasPolicy, DEFAULT_GAS_MULTIPLIER};
use crate::contract::ContractRef;
use crate::error::{Error, ErrorKind, Result};
use crate::hdnode::{Account, KeyMaterial};
use crate::network::{paths, LedgerTransport, TxResult};
use crate::transaction_builder::{fetch_account_sequence, AccountSequence, TransactionBuilder};
use crate::transactions::Msg;

#[cfg(feature = "http")]
use crate::{config::ClientConfig, rpc::RpcNode};

/// Event attribute carrying the id of uploaded code.
const CODE_ID_EVENT: (&str, &str) = ("store_code", "code_id");
/// Event attribute carrying the address of a new contract.
const CONTRACT_ADDRESS_EVENT: (&str, &str) = ("instantiate", "_contract_address");

/// Metadata of an instantiated contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractInfo {
    /// Code the contract runs
    pub code_id: u64,
    /// Instantiator address
    pub creator: String,
    /// Migration admin, if any
    pub admin: Option<String>,
    /// Human-readable label
    pub label: String,
}

/// Client that signs with a single key and talks to a single ledger.
///
/// Reads may run concurrently. Every mutating call takes the submission
/// lock, so at most one transaction per account is in flight and sequence
/// numbers are never reused.
#[derive(Debug)]
pub struct SigningClient {
    transport: Arc<dyn LedgerTransport>,
    key: KeyMaterial,
    gas_policy: GasPolicy,
    gas_multiplier: f64,
    account: Mutex<Option<AccountSequence>>,
}

impl SigningClient {
    pub fn with_transport(
        transport: Arc<dyn LedgerTransport>,
        key: KeyMaterial,
        gas_policy: GasPolicy,
    ) -> Self {
        //! Create a client over an arbitrary transport.
        Self {
            transport,
            key,
            gas_policy,
            gas_multiplier: DEFAULT_GAS_MULTIPLIER,
            account: Mutex::new(None),
        }
    }

    #[cfg(feature = "http")]
    pub async fn build(
        endpoint: &str,
        mnemonic: &str,
        prefix: &str,
        gas_policy: GasPolicy,
    ) -> Result<Self> {
        //! Derive the key and connect to a CometBFT RPC endpoint.
        let key = KeyMaterial::derive(mnemonic, prefix)?;
        let node = RpcNode::connect(endpoint).await?;
        Ok(Self::with_transport(Arc::new(node), key, gas_policy))
    }

    #[cfg(feature = "http")]
    pub async fn from_config(config: &ClientConfig) -> Result<Self> {
        //! Build a client from configuration.
        let key = KeyMaterial::derive(config.mnemonic()?.expose(), &config.prefix)?;
        let gas_policy = config.gas_policy()?;
        let mut node = RpcNode::new(&config.rpc_endpoint)?
            .with_timeouts(config.broadcast_timeout, config.poll_interval);
        if let Some(chain_id) = &config.chain_id {
            node = node.with_chain_id(chain_id);
        }
        let chain_id = node.chain_id().await?;
        info!(%chain_id, address = %key.address(), "signing client ready");
        Ok(Self::with_transport(Arc::new(node), key, gas_policy)
            .with_gas_multiplier(config.gas_multiplier))
    }

    #[must_use]
    pub fn with_gas_multiplier(mut self, gas_multiplier: f64) -> Self {
        //! Set the safety margin applied to simulated gas.
        self.gas_multiplier = gas_multiplier;
        self
    }

    pub const fn account(&self) -> &Account {
        //! Signing account.
        self.key.account()
    }

    pub const fn address(&self) -> &AccountAddress {
        //! Address of the signing account.
        self.key.address()
    }

    pub const fn gas_policy(&self) -> &GasPolicy {
        //! Fee policy of this session.
        &self.gas_policy
    }

    pub fn transport(&self) -> &dyn LedgerTransport {
        //! Underlying transport.
        self.transport.as_ref()
    }

    pub async fn sequence(&self) -> Result<AccountSequence> {
        //! Account number and sequence the next transaction will use.
        //!
        //! Waits for an in-flight submission to finish.
        let mut cached = self.account.lock().await;
        match *cached {
            Some(account) => Ok(account),
            None => {
                let account = fetch_account_sequence(self.transport(), self.address()).await?;
                *cached = Some(account);
                Ok(account)
            }
        }
    }

    pub async fn get_balance(&self, address: &AccountAddress, denom: &str) -> Result<Coin> {
        //! Bank balance of `address` in `denom`; zero for unknown accounts.
        let request = QueryBalanceRequest {
            address: address.to_string(),
            denom: denom.to_string(),
        };
        let raw = self
            .transport
            .abci_query(paths::BALANCE, request.encode_to_vec())
            .await?;
        match QueryBalanceResponse::decode(&raw[..])?.balance {
            Some(balance) => balance.try_into(),
            None => Ok(Coin::new(0, denom)),
        }
    }

    pub async fn contract_info(&self, contract: &AccountAddress) -> Result<ContractInfo> {
        //! Metadata of the contract at `contract`.
        let request = QueryContractInfoRequest {
            address: contract.to_string(),
        };
        let raw = self
            .transport
            .abci_query(paths::CONTRACT_INFO, request.encode_to_vec())
            .await?;
        let info = QueryContractInfoResponse::decode(&raw[..])?
            .contract_info
            .ok_or_else(|| Error::Decode(format!("no contract info for {contract}")))?;
        Ok(ContractInfo {
            code_id: info.code_id,
            creator: info.creator,
            admin: Some(info.admin).filter(|admin| !admin.is_empty()),
            label: info.label,
        })
    }

    pub async fn query<Q, T>(&self, contract: &AccountAddress, msg: &Q) -> Result<T>
    where
        Q: Serialize + Sync,
        T: DeserializeOwned,
    {
        //! Run a smart query against `contract`.
        let request = QuerySmartContractStateRequest {
            address: contract.to_string(),
            query_data: serde_json::to_vec(msg)?,
        };
        let raw = self
            .transport
            .abci_query(paths::SMART_CONTRACT_STATE, request.encode_to_vec())
            .await
            .map_err(|e| match e {
                Error::QueryRejected {
                    code,
                    codespace,
                    log,
                } => Error::from_query_failure(code, &codespace, &log),
                e => e,
            })?;
        let data = QuerySmartContractStateResponse::decode(&raw[..])?.data;
        Ok(serde_json::from_slice(&data)?)
    }

    pub async fn send_tokens(
        &self,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: Vec<Coin>,
    ) -> Result<TxResult> {
        //! Transfer `amount` from the signing account to `to`.
        self.ensure_signer(from)?;
        self.submit(vec![Msg::Send {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        }])
        .await
    }

    pub async fn upload_code(&self, wasm_byte_code: Vec<u8>) -> Result<u64> {
        //! Upload contract bytecode and return the assigned code id.
        let result = self
            .submit(vec![Msg::StoreCode {
                sender: self.address().to_string(),
                wasm_byte_code,
            }])
            .await?;
        let (kind, key) = CODE_ID_EVENT;
        let code_id = result
            .attribute(kind, key)
            .and_then(|value| value.parse().ok())
            .ok_or_else(|| Error::Decode(format!("no {kind}.{key} event in {}", result.hash)))?;
        info!(code_id, "uploaded code");
        Ok(code_id)
    }

    pub async fn instantiate<M>(
        &self,
        code_id: u64,
        init_msg: &M,
        label: &str,
        admin: Option<&AccountAddress>,
    ) -> Result<ContractRef>
    where
        M: Serialize + Sync,
    {
        //! Create a contract from uploaded code.
        let result = self
            .submit(vec![Msg::Instantiate {
                sender: self.address().to_string(),
                admin: admin.map(ToString::to_string),
                code_id,
                label: label.to_string(),
                msg: serde_json::to_vec(init_msg)?,
                funds: vec![],
            }])
            .await?;
        let (kind, key) = CONTRACT_ADDRESS_EVENT;
        let address: AccountAddress = result
            .attribute(kind, key)
            .ok_or_else(|| Error::Decode(format!("no {kind}.{key} event in {}", result.hash)))?
            .parse()?;
        info!(code_id, %address, "instantiated contract");
        Ok(ContractRef { code_id, address })
    }

    pub async fn execute<M>(
        &self,
        sender: &AccountAddress,
        contract: &AccountAddress,
        msg: &M,
        funds: Vec<Coin>,
    ) -> Result<TxResult>
    where
        M: Serialize + Sync,
    {
        //! Execute `msg` on `contract`, attaching `funds`.
        self.ensure_signer(sender)?;
        self.submit(vec![Msg::Execute {
            sender: sender.to_string(),
            contract: contract.to_string(),
            msg: serde_json::to_vec(msg)?,
            funds,
        }])
        .await
    }

    fn ensure_signer(&self, sender: &AccountAddress) -> Result<()> {
        if sender == self.address() {
            Ok(())
        } else {
            Err(Error::SignerMismatch {
                expected: self.address().to_string(),
                got: sender.to_string(),
            })
        }
    }

    async fn submit(&self, messages: Vec<Msg>) -> Result<TxResult> {
        //! Build, sign and broadcast under the submission lock.
        //!
        //! The cached sequence is bumped once the node accepted the
        //! transaction, even if it later failed during execution, and
        //! dropped whenever the outcome leaves it in doubt.
        let mut cached = self.account.lock().await;
        let account = match *cached {
            Some(account) => account,
            None => fetch_account_sequence(self.transport(), self.address()).await?,
        };

        let builder = messages
            .into_iter()
            .fold(
                TransactionBuilder::new(self.transport(), &self.key),
                TransactionBuilder::add_message,
            )
            .account(account)
            .gas_policy(self.gas_policy.clone())
            .gas_multiplier(self.gas_multiplier);
        let tx = match builder.build().await {
            Ok(tx) => tx,
            Err(e) => {
                Self::forget_sequence_on(&e, &mut cached);
                return Err(e);
            }
        };

        let signed = tx.sign(&self.key);
        debug!(
            hash = %signed.hash(),
            sequence = account.sequence,
            gas_limit = tx.gas_limit,
            "broadcasting transaction"
        );
        match self.transport.broadcast(signed.to_broadcastable_bytes()).await {
            Ok(result) => {
                *cached = Some(AccountSequence {
                    sequence: account.sequence + 1,
                    ..account
                });
                info!(hash = %result.hash, height = result.height, code = result.code, "transaction committed");
                if result.is_ok() {
                    Ok(result)
                } else {
                    Err(Error::from_tx_failure(
                        result.code,
                        &result.codespace,
                        &result.raw_log,
                    ))
                }
            }
            Err(e) => {
                Self::forget_sequence_on(&e, &mut cached);
                Err(match e {
                    Error::BroadcastRejected {
                        code,
                        codespace,
                        log,
                    } => Error::from_tx_failure(code, &codespace, &log),
                    e => e,
                })
            }
        }
    }

    fn forget_sequence_on(error: &Error, cached: &mut Option<AccountSequence>) {
        if error.is_wrong_sequence()
            || matches!(error.kind(), ErrorKind::Unreachable | ErrorKind::Timeout)
        {
            warn!(%error, "discarding cached account sequence");
            *cached = None;
        }
    }
}
