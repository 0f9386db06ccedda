//! Error taxonomy shared by every layer of the crate.

/// Codespace of the Cosmos SDK base errors.
pub const SDK_CODESPACE: &str = "sdk";
/// Codespace of the `x/wasm` module errors.
pub const WASM_CODESPACE: &str = "wasm";

/// `sdk` code for insufficient funds.
pub const SDK_INSUFFICIENT_FUNDS: u32 = 5;
/// `sdk` code for a wrong account sequence.
pub const SDK_WRONG_SEQUENCE: u32 = 32;
/// `wasm` code for a failed instantiation.
pub const WASM_INSTANTIATE_FAILED: u32 = 4;
/// `wasm` code for a failed execution.
pub const WASM_EXECUTE_FAILED: u32 = 5;
/// `wasm` code for a failed smart query.
pub const WASM_QUERY_FAILED: u32 = 9;

/// Generic result of all fallible calls in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between a caller and the remote ledger.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Mnemonic failed wordlist or checksum validation.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),
    /// Malformed bech32 address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// Malformed coin or gas price literal.
    #[error("invalid coin: {0}")]
    InvalidCoin(String),
    /// Bad or incomplete configuration.
    #[error("configuration error: {0}")]
    Config(String),
    /// Node could not be reached or returned garbage at the HTTP level.
    #[error("node unreachable: {0}")]
    Unreachable(String),
    /// Sender cannot cover the transferred amount or the fee.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),
    /// Transaction was refused by the node (malformed, underpriced, bad sequence...).
    #[error("broadcast rejected ({codespace}/{code}): {log}")]
    BroadcastRejected {
        /// ABCI error code
        code: u32,
        /// ABCI error codespace
        codespace: String,
        /// Raw log returned by the node
        log: String,
    },
    /// Contract instantiation failed.
    #[error("instantiation failed: {0}")]
    InstantiationFailed(String),
    /// Contract refused to execute a message.
    #[error("contract execution failed (code {code}): {message}")]
    ContractExecution {
        /// ABCI error code
        code: u32,
        /// Contract error message
        message: String,
    },
    /// Read-only query was refused by the node.
    #[error("query rejected ({codespace}/{code}): {log}")]
    QueryRejected {
        /// ABCI error code
        code: u32,
        /// ABCI error codespace
        codespace: String,
        /// Raw log returned by the node
        log: String,
    },
    /// Contract returned an error to a smart query.
    #[error("contract query failed (code {code}): {message}")]
    ContractQuery {
        /// ABCI error code
        code: u32,
        /// Contract error message
        message: String,
    },
    /// Transaction was broadcast, but was not seen in a block in time.
    ///
    /// The outcome is unknown: re-query contract state instead of resubmitting.
    #[error("timed out waiting for transaction {hash}")]
    Timeout {
        /// Hex transaction hash
        hash: String,
    },
    /// Account has never received funds, so the chain does not know it.
    #[error("account {0} not found on chain")]
    AccountNotFound(String),
    /// Caller asked to sign on behalf of an address this client does not own.
    #[error("signer mismatch: client signs as {expected}, got {got}")]
    SignerMismatch {
        /// Address of the client key
        expected: String,
        /// Requested sender
        got: String,
    },
    /// Contract gateway is not in a state that permits the operation.
    #[error("invalid gateway state: expected {expected}, found {actual}")]
    InvalidState {
        /// Required state
        expected: &'static str,
        /// Current state
        actual: String,
    },
    /// Transaction has no messages.
    #[error("cannot build an empty transaction, add at least one message first")]
    EmptyTransaction,
    /// Entry with the given id does not exist.
    #[error("entry {0} not found")]
    EntryNotFound(u64),
    /// Response could not be decoded.
    #[error("decoding failed: {0}")]
    Decode(String),
}

/// Coarse classification of [`Error`] for reporting.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Bad caller input, fatal
    InvalidInput,
    /// Network failure, retryable with backoff
    Unreachable,
    /// Semantic rejection by the ledger or contract
    Rejected,
    /// Read failure, freely retryable
    ReadFailed,
    /// Ambiguous outcome
    Timeout,
    /// Misuse of the client API
    Usage,
    /// Unexpected payload
    Decode,
}

impl Error {
    pub const fn kind(&self) -> ErrorKind {
        //! Classify this error.
        match self {
            Self::InvalidMnemonic(_)
            | Self::InvalidAddress(_)
            | Self::InvalidCoin(_)
            | Self::Config(_) => ErrorKind::InvalidInput,
            Self::Unreachable(_) => ErrorKind::Unreachable,
            Self::InsufficientFunds(_)
            | Self::BroadcastRejected { .. }
            | Self::InstantiationFailed(_)
            | Self::ContractExecution { .. }
            | Self::AccountNotFound(_)
            | Self::EntryNotFound(_) => ErrorKind::Rejected,
            Self::QueryRejected { .. } | Self::ContractQuery { .. } => ErrorKind::ReadFailed,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::SignerMismatch { .. } | Self::InvalidState { .. } | Self::EmptyTransaction => {
                ErrorKind::Usage
            }
            Self::Decode(_) => ErrorKind::Decode,
        }
    }

    pub const fn is_retryable(&self) -> bool {
        //! Whether the same call may be repeated unchanged.
        //!
        //! Mutating calls are never retryable: a timeout must be resolved
        //! by querying state.
        matches!(
            self.kind(),
            ErrorKind::Unreachable | ErrorKind::ReadFailed
        )
    }

    pub(crate) fn from_tx_failure(code: u32, codespace: &str, log: &str) -> Self {
        //! Map a failed `CheckTx`/`DeliverTx`/simulation to a typed error.
        match codespace {
            SDK_CODESPACE if code == SDK_INSUFFICIENT_FUNDS => {
                Self::InsufficientFunds(log.to_string())
            }
            WASM_CODESPACE if code == WASM_INSTANTIATE_FAILED => {
                Self::InstantiationFailed(log.to_string())
            }
            WASM_CODESPACE => Self::ContractExecution {
                code,
                message: log.to_string(),
            },
            _ => Self::BroadcastRejected {
                code,
                codespace: codespace.to_string(),
                log: log.to_string(),
            },
        }
    }

    pub(crate) fn from_query_failure(code: u32, codespace: &str, log: &str) -> Self {
        //! Map a failed smart query to a typed error.
        if codespace == WASM_CODESPACE {
            Self::ContractQuery {
                code,
                message: log.to_string(),
            }
        } else {
            Self::QueryRejected {
                code,
                codespace: codespace.to_string(),
                log: log.to_string(),
            }
        }
    }

    pub(crate) fn is_wrong_sequence(&self) -> bool {
        matches!(self, Self::BroadcastRejected { code, codespace, .. }
            if *code == SDK_WRONG_SEQUENCE && codespace == SDK_CODESPACE)
    }
}

impl From<prost::DecodeError> for Error {
    fn from(err: prost::DecodeError) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Unreachable(err.to_string())
    }
}
