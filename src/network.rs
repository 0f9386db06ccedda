//! Ledger transport abstraction and the data it exchanges.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// gRPC paths of the ABCI queries used by this crate.
pub mod paths {
    /// Account number and sequence
    pub const ACCOUNT: &str = "/cosmos.auth.v1beta1.Query/Account";
    /// Bank balance of one denom
    pub const BALANCE: &str = "/cosmos.bank.v1beta1.Query/Balance";
    /// Transaction gas simulation
    pub const SIMULATE: &str = "/cosmos.tx.v1beta1.Service/Simulate";
    /// Contract smart query
    pub const SMART_CONTRACT_STATE: &str = "/cosmwasm.wasm.v1.Query/SmartContractState";
    /// Contract metadata
    pub const CONTRACT_INFO: &str = "/cosmwasm.wasm.v1.Query/ContractInfo";
}

/// Single attribute of an emitted event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttribute {
    /// Attribute name
    pub key: String,
    /// Attribute value
    #[serde(default)]
    pub value: String,
}

/// Event emitted during transaction execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event type, e.g. `instantiate`
    #[serde(rename = "type")]
    pub kind: String,
    /// Attributes in emission order
    #[serde(default)]
    pub attributes: Vec<EventAttribute>,
}

/// Outcome of a transaction included into a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    /// Upper-case hex hash
    pub hash: String,
    /// Inclusion height
    pub height: u64,
    /// ABCI code, zero on success
    pub code: u32,
    /// ABCI codespace, empty on success
    pub codespace: String,
    /// Raw execution log
    pub raw_log: String,
    /// Gas limit of the transaction
    pub gas_wanted: u64,
    /// Gas actually consumed
    pub gas_used: u64,
    /// Emitted events
    pub events: Vec<Event>,
}

impl TxResult {
    pub const fn is_ok(&self) -> bool {
        //! Whether the transaction executed successfully.
        self.code == 0
    }

    pub fn attribute(&self, kind: &str, key: &str) -> Option<&str> {
        //! Value of the first attribute `key` of the first event of type `kind` carrying it.
        self.events
            .iter()
            .filter(|event| event.kind == kind)
            .flat_map(|event| event.attributes.iter())
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }
}

/// Raw primitives of a remote ledger.
///
/// Implementations must be safe to share between tasks; reads may run
/// concurrently, while submissions are serialized by the caller.
#[async_trait]
pub trait LedgerTransport: Send + Sync {
    /// Identifier of the connected chain, part of every signed document.
    async fn chain_id(&self) -> Result<String>;

    /// Submit a signed transaction and wait until it is included into a block.
    ///
    /// Fails with [`Error::BroadcastRejected`](crate::Error::BroadcastRejected)
    /// if the node refuses it, and with [`Error::Timeout`](crate::Error::Timeout)
    /// if inclusion was not observed in time. Once the node accepted the
    /// transaction, no other error may be returned: the outcome is unknown.
    /// A transaction that was included but failed during execution is
    /// returned with a non-zero code.
    async fn broadcast(&self, tx_bytes: Vec<u8>) -> Result<TxResult>;

    /// Run a read-only ABCI query.
    ///
    /// Application errors are reported as
    /// [`Error::QueryRejected`](crate::Error::QueryRejected).
    async fn abci_query(&self, path: &str, data: Vec<u8>) -> Result<Vec<u8>>;
}

impl std::fmt::Debug for dyn LedgerTransport + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LedgerTransport")
    }
}
