//! Client configuration: endpoint, key, gas and timing parameters.

use std::{env, fmt, path::Path, time::Duration};

use serde::Deserialize;
use zeroize::Zeroizing;

use crate::coin::{GasPolicy, DEFAULT_GAS_MULTIPLIER};
use crate::error::{Error, Result};

/// Secret phrase, wiped from memory on drop and never printed.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct SecretPhrase(Zeroizing<String>);

impl SecretPhrase {
    pub fn new(phrase: String) -> Self {
        //! Take ownership of a phrase.
        Self(Zeroizing::new(phrase))
    }

    pub fn expose(&self) -> &str {
        //! Borrow the phrase for key derivation.
        &self.0
    }
}

impl fmt::Debug for SecretPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretPhrase(<redacted>)")
    }
}

/// Everything needed to build a [`SigningClient`](crate::client::SigningClient).
#[serde_with::serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// CometBFT RPC endpoint
    pub rpc_endpoint: String,
    /// Bech32 address prefix
    pub prefix: String,
    /// Signing mnemonic
    pub mnemonic: Option<SecretPhrase>,
    /// Gas price such as `0.025ujunox`; automatic gas if absent
    pub gas_price: Option<String>,
    /// Safety margin applied to simulated gas
    pub gas_multiplier: f64,
    /// Chain id; asked from the node if absent
    pub chain_id: Option<String>,
    /// How long to wait for block inclusion
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub broadcast_timeout: Duration,
    /// Delay between inclusion checks
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub poll_interval: Duration,
    /// Faucet endpoint for test tokens
    pub faucet_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_endpoint: Self::JUNO_TESTNET_RPC.to_string(),
            prefix: Self::JUNO_PREFIX.to_string(),
            mnemonic: None,
            gas_price: None,
            gas_multiplier: DEFAULT_GAS_MULTIPLIER,
            chain_id: None,
            broadcast_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_secs(3),
            faucet_url: None,
        }
    }
}

impl ClientConfig {
    /// RPC URL for Juno testnet (one possible)
    pub const JUNO_TESTNET_RPC: &'static str = "https://juno-testnet-rpc.polkachu.com";
    /// Bech32 prefix of Juno
    pub const JUNO_PREFIX: &'static str = "juno";
    /// Testnet fee token of Juno
    pub const JUNO_TESTNET_DENOM: &'static str = "ujunox";

    pub fn juno_testnet() -> Self {
        //! Juno testnet parameters
        Self {
            gas_price: Some(format!("0.025{}", Self::JUNO_TESTNET_DENOM)),
            ..Self::default()
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        //! Parse TOML configuration; missing keys take default values.
        toml::from_str(source).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        //! Read TOML configuration from disk.
        let source = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&source)
    }

    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        //! Override fields from `CW_*` environment variables.
        //!
        //! Recognized: `CW_RPC_ENDPOINT`, `CW_PREFIX`, `CW_MNEMONIC`,
        //! `CW_GAS_PRICE`, `CW_CHAIN_ID`, `CW_FAUCET_URL`.
        if let Ok(value) = env::var("CW_RPC_ENDPOINT") {
            self.rpc_endpoint = value;
        }
        if let Ok(value) = env::var("CW_PREFIX") {
            self.prefix = value;
        }
        if let Ok(value) = env::var("CW_MNEMONIC") {
            self.mnemonic = Some(SecretPhrase::new(value));
        }
        if let Ok(value) = env::var("CW_GAS_PRICE") {
            self.gas_price = Some(value);
        }
        if let Ok(value) = env::var("CW_CHAIN_ID") {
            self.chain_id = Some(value);
        }
        if let Ok(value) = env::var("CW_FAUCET_URL") {
            self.faucet_url = Some(value);
        }
        self
    }

    pub fn gas_policy(&self) -> Result<GasPolicy> {
        //! Parsed gas policy.
        GasPolicy::from_config(self.gas_price.as_deref())
    }

    pub fn mnemonic(&self) -> Result<&SecretPhrase> {
        //! Configured mnemonic, or a configuration error.
        self.mnemonic
            .as_ref()
            .ok_or_else(|| Error::Config("mnemonic is not configured".to_string()))
    }
}
