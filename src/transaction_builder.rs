use cosmos_sdk_proto::cosmos::auth::v1beta1::{
    BaseAccount, QueryAccountRequest, QueryAccountResponse,
};
use cosmos_sdk_proto::cosmos::tx::v1beta1::{SimulateRequest, SimulateResponse};
use prost::Message;
use tracing::debug;

use crate::address::AccountAddress;
use crate::coin::{Coin, GasPolicy, DEFAULT_GAS_MULTIPLIER};
use crate::error::{Error, Result};
use crate::hdnode::KeyMaterial;
use crate::network::{paths, LedgerTransport};
use crate::transactions::{type_urls, Msg, Transaction};

/// On-chain account number and next sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AccountSequence {
    /// Immutable account number
    pub account_number: u64,
    /// Sequence expected for the next transaction
    pub sequence: u64,
}

pub(crate) async fn fetch_account_sequence(
    transport: &dyn LedgerTransport,
    address: &AccountAddress,
) -> Result<AccountSequence> {
    let request = QueryAccountRequest {
        address: address.to_string(),
    };
    let raw = transport
        .abci_query(paths::ACCOUNT, request.encode_to_vec())
        .await
        .map_err(|e| match e {
            Error::QueryRejected { log, .. } if log.contains("not found") => {
                Error::AccountNotFound(address.to_string())
            }
            e => e,
        })?;
    let account = QueryAccountResponse::decode(&raw[..])?
        .account
        .ok_or_else(|| Error::AccountNotFound(address.to_string()))?;
    if account.type_url != type_urls::BASE_ACCOUNT {
        return Err(Error::Decode(format!(
            "unsupported account type {}",
            account.type_url
        )));
    }
    let account = BaseAccount::decode(&account.value[..])?;
    Ok(AccountSequence {
        account_number: account.account_number,
        sequence: account.sequence,
    })
}

pub(crate) async fn simulate_gas(transport: &dyn LedgerTransport, tx: &Transaction) -> Result<u64> {
    let request = SimulateRequest {
        tx_bytes: tx.to_simulation_bytes(),
        ..Default::default()
    };
    let raw = transport
        .abci_query(paths::SIMULATE, request.encode_to_vec())
        .await
        .map_err(|e| match e {
            Error::QueryRejected {
                code,
                codespace,
                log,
            } => Error::from_tx_failure(code, &codespace, &log),
            e => e,
        })?;
    let gas_used = SimulateResponse::decode(&raw[..])?
        .gas_info
        .map(|info| info.gas_used)
        .ok_or_else(|| Error::Decode("simulation returned no gas info".to_string()))?;
    debug!(gas_used, "simulated transaction");
    Ok(gas_used)
}

/// Transaction builder allows to create and prepare transactions
/// with minimal developers efforts.
#[derive(Clone, Debug)]
pub struct TransactionBuilder<'a> {
    transport: &'a dyn LedgerTransport,
    key: &'a KeyMaterial,
    messages: Vec<Msg>,
    memo: String,
    chain_id: Option<String>,
    account: Option<AccountSequence>,
    gas_limit: Option<u64>,
    gas_policy: GasPolicy,
    gas_multiplier: f64,
}

impl<'a> TransactionBuilder<'a> {
    #[must_use]
    pub fn new(transport: &'a dyn LedgerTransport, key: &'a KeyMaterial) -> Self {
        //! Create a new builder.
        Self {
            transport,
            key,
            messages: vec![],
            memo: String::new(),
            chain_id: None,
            account: None,
            gas_limit: None,
            gas_policy: GasPolicy::Auto,
            gas_multiplier: DEFAULT_GAS_MULTIPLIER,
        }
    }
    #[must_use]
    pub fn chain_id(mut self, chain_id: &str) -> Self {
        //! Set chain id instead of asking the node.
        self.chain_id = Some(chain_id.to_string());
        self
    }
    #[must_use]
    pub const fn account(mut self, account: AccountSequence) -> Self {
        //! Set account number and sequence instead of asking the node.
        self.account = Some(account);
        self
    }
    #[must_use]
    pub const fn gas_limit(mut self, gas_limit: u64) -> Self {
        //! Set maximal gas amount for transaction, skipping simulation.
        self.gas_limit = Some(gas_limit);
        self
    }
    #[must_use]
    pub fn gas_policy(mut self, gas_policy: GasPolicy) -> Self {
        //! Set how the fee is computed.
        self.gas_policy = gas_policy;
        self
    }
    #[must_use]
    pub fn gas_multiplier(mut self, gas_multiplier: f64) -> Self {
        //! Set the safety margin applied to simulated gas.
        self.gas_multiplier = gas_multiplier;
        self
    }
    #[must_use]
    pub fn memo(mut self, memo: &str) -> Self {
        //! Set transaction memo.
        self.memo = memo.to_string();
        self
    }
    #[must_use]
    pub fn add_transfer(self, recipient: &AccountAddress, amount: Vec<Coin>) -> Self {
        //! Add a simple transfer from the signer.
        let from = self.key.address().to_string();
        self.add_message(Msg::Send {
            from,
            to: recipient.to_string(),
            amount,
        })
    }
    #[must_use]
    pub fn add_store_code(self, wasm_byte_code: Vec<u8>) -> Self {
        //! Add a bytecode upload.
        let sender = self.key.address().to_string();
        self.add_message(Msg::StoreCode {
            sender,
            wasm_byte_code,
        })
    }
    #[must_use]
    pub fn add_instantiate(
        self,
        code_id: u64,
        msg: Vec<u8>,
        label: &str,
        admin: Option<&AccountAddress>,
        funds: Vec<Coin>,
    ) -> Self {
        //! Add a contract instantiation.
        let sender = self.key.address().to_string();
        self.add_message(Msg::Instantiate {
            sender,
            admin: admin.map(ToString::to_string),
            code_id,
            label: label.to_string(),
            msg,
            funds,
        })
    }
    #[must_use]
    pub fn add_contract_call(
        self,
        contract: &AccountAddress,
        msg: Vec<u8>,
        funds: Vec<Coin>,
    ) -> Self {
        //! Add a contract method call.
        let sender = self.key.address().to_string();
        self.add_message(Msg::Execute {
            sender,
            contract: contract.to_string(),
            msg,
            funds,
        })
    }
    #[must_use]
    pub fn add_message(mut self, message: Msg) -> Self {
        //! Add an arbitrary, user-provided message.
        self.messages.push(message);
        self
    }

    pub async fn build(&self) -> Result<Transaction> {
        //! Prepare a `Transaction`. This may perform network requests
        //! to identify appropriate parameters.
        if self.messages.is_empty() {
            return Err(Error::EmptyTransaction);
        }
        let chain_id = match &self.chain_id {
            Some(id) => id.clone(),
            None => self.transport.chain_id().await?,
        };
        let account = match self.account {
            Some(account) => account,
            None => fetch_account_sequence(self.transport, self.key.address()).await?,
        };
        let mut tx = Transaction {
            chain_id,
            account_number: account.account_number,
            sequence: account.sequence,
            messages: self.messages.clone(),
            memo: self.memo.clone(),
            gas_limit: self.gas_limit.unwrap_or(0),
            fee: vec![],
            public_key: self.key.public_key_bytes(),
        };
        if self.gas_limit.is_none() {
            let gas_used = simulate_gas(self.transport, &tx).await?;
            tx.gas_limit = (gas_used as f64 * self.gas_multiplier).ceil() as u64;
        }
        tx.fee = self.gas_policy.fee(tx.gas_limit);
        Ok(tx)
    }
}
