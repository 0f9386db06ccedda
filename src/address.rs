//! Bech32 account and contract addresses.

use crate::error::Error;
use crate::utils::ripemd160_sha256;
use bech32::{FromBase32, ToBase32, Variant};
pub use secp256k1::{PublicKey, SecretKey as PrivateKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, result::Result, str::FromStr};

/// Bech32-encoded address: human-readable prefix plus raw bytes.
///
/// Accounts have 20 bytes of payload, contracts usually have 32.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccountAddress {
    prefix: String,
    bytes: Vec<u8>,
    encoded: String,
}

impl AccountAddress {
    /// Size of an account key hash in bytes.
    pub const ACCOUNT_WIDTH: usize = 20;
    /// Size of a contract address in bytes.
    pub const CONTRACT_WIDTH: usize = 32;

    pub fn from_bytes<S: AsRef<[u8]>>(prefix: &str, bytes: S) -> Result<Self, Error> {
        //! Encode raw bytes under the given prefix.
        let bytes = bytes.as_ref().to_vec();
        if bytes.is_empty() || bytes.len() > 255 {
            return Err(Error::InvalidAddress(format!(
                "address payload must be 1..=255 bytes, got {}",
                bytes.len()
            )));
        }
        let encoded = bech32::encode(prefix, bytes.to_base32(), Variant::Bech32)
            .map_err(|e| Error::InvalidAddress(e.to_string()))?;
        Ok(Self {
            prefix: prefix.to_string(),
            bytes,
            encoded,
        })
    }

    pub fn prefix(&self) -> &str {
        //! Human-readable part.
        &self.prefix
    }

    pub fn as_bytes(&self) -> &[u8] {
        //! Raw payload.
        &self.bytes
    }

    pub fn as_str(&self) -> &str {
        //! Encoded form.
        &self.encoded
    }

    pub fn with_prefix(&self, prefix: &str) -> Result<Self, Error> {
        //! Same key hash under another chain prefix.
        Self::from_bytes(prefix, &self.bytes)
    }
}

impl FromStr for AccountAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, data, variant) =
            bech32::decode(s).map_err(|e| Error::InvalidAddress(format!("{s}: {e}")))?;
        if variant != Variant::Bech32 {
            return Err(Error::InvalidAddress(format!("{s}: bech32m is not used")));
        }
        let bytes =
            Vec::<u8>::from_base32(&data).map_err(|e| Error::InvalidAddress(e.to_string()))?;
        Self::from_bytes(&prefix, bytes)
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encoded)
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A trait for objects that can generate an on-chain address.
pub trait AddressConvertible {
    /// Create an address under the given bech32 prefix.
    fn address(&self, prefix: &str) -> Result<AccountAddress, Error>;
}

impl AddressConvertible for PublicKey {
    fn address(&self, prefix: &str) -> Result<AccountAddress, Error> {
        //! Generate address from the compressed public key.
        AccountAddress::from_bytes(prefix, ripemd160_sha256(self.serialize()))
    }
}
