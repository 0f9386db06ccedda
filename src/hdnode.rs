//! Cosmos-tailored hierarchically deterministic keys.
//!
//! `Reference <https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki>`

use std::{fmt, str::FromStr};

use bip32::{ChildNumber, DerivationPath, ExtendedPrivateKey, ExtendedPublicKey};
pub use bip39::{Language, Mnemonic, MnemonicType};
use secp256k1::{ecdsa::Signature, Message, PublicKey, Secp256k1, SecretKey as PrivateKey};
use zeroize::Zeroizing;

use crate::address::{AccountAddress, AddressConvertible};
use crate::error::{Error, Result};
use crate::utils::sha256;

/// Default HD derivation path for Cosmos SDK chains (coin type 118).
pub const COSMOS_EXTERNAL_PATH: &str = "m/44'/118'/0'/0/0";

/// HD Node wrapper
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HDNode(ExtendedPrivateKey<PrivateKey>);

impl HDNode {
    pub fn from_seed<S: AsRef<[u8]>>(seed: S, init_path: &str) -> Result<Self> {
        //! Create an HDNode using the seed and the given derivation path.
        let path = DerivationPath::from_str(init_path)
            .map_err(|e| Error::InvalidMnemonic(format!("bad derivation path: {e}")))?;
        ExtendedPrivateKey::derive_from_path(seed, &path)
            .map(Self)
            .map_err(|e| Error::InvalidMnemonic(e.to_string()))
    }

    pub fn from_mnemonic(mnemonic: &Mnemonic, init_path: &str) -> Result<Self> {
        //! Create an HDNode from mnemonic and the given derivation path.
        Self::from_seed(bip39::Seed::new(mnemonic, ""), init_path)
    }

    pub fn from_mnemonic_cosmos(mnemonic: &Mnemonic) -> Result<Self> {
        //! Create an HDNode from mnemonic using default derivation path.
        Self::from_mnemonic(mnemonic, COSMOS_EXTERNAL_PATH)
    }

    pub fn derive(&self, index: u32) -> Result<Self> {
        //! Derive a child given an index.
        self.0
            .derive_child(ChildNumber(index))
            .map(Self)
            .map_err(|e| Error::InvalidMnemonic(e.to_string()))
    }

    pub fn public_key(&self) -> ExtendedPublicKey<PublicKey> {
        //! Get underlying public key.
        self.0.public_key()
    }

    pub fn private_key(&self) -> &PrivateKey {
        //! Get underlying private key.
        self.0.private_key()
    }
}

/// Derived account: bech32 address and secp256k1 public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    /// Bech32 account address
    pub address: AccountAddress,
    /// Compressed secp256k1 public key
    pub public_key: PublicKey,
}

/// Signing key derived from a mnemonic.
///
/// The phrase itself is never kept: only the derived node survives
/// construction, and it is not printed by [`Debug`](fmt::Debug).
#[derive(Clone)]
pub struct KeyMaterial {
    node: HDNode,
    account: Account,
}

impl KeyMaterial {
    pub fn derive(mnemonic: &str, prefix: &str) -> Result<Self> {
        //! Derive the first account of a mnemonic under the given bech32 prefix.
        //!
        //! Deterministic, performs no I/O.
        let phrase = Zeroizing::new(mnemonic.trim().to_string());
        let mnemonic = Mnemonic::from_phrase(&phrase, Language::English)
            .map_err(|e| Error::InvalidMnemonic(e.to_string()))?;
        Self::from_mnemonic(&mnemonic, prefix)
    }

    pub fn from_mnemonic(mnemonic: &Mnemonic, prefix: &str) -> Result<Self> {
        //! Derive from an already validated mnemonic.
        let node = HDNode::from_mnemonic_cosmos(mnemonic)?;
        let public_key = *node.public_key().public_key();
        let address = public_key.address(prefix)?;
        Ok(Self {
            node,
            account: Account {
                address,
                public_key,
            },
        })
    }

    pub fn generate(words: MnemonicType, prefix: &str) -> Result<(Self, Zeroizing<String>)> {
        //! Create a fresh random wallet.
        //!
        //! The phrase is returned once, so that the caller can store it.
        let mnemonic = Mnemonic::new(words, Language::English);
        let key = Self::from_mnemonic(&mnemonic, prefix)?;
        Ok((key, Zeroizing::new(mnemonic.phrase().to_string())))
    }

    pub const fn account(&self) -> &Account {
        //! Derived account.
        &self.account
    }

    pub const fn address(&self) -> &AccountAddress {
        //! Derived address.
        &self.account.address
    }

    pub fn public_key_bytes(&self) -> Vec<u8> {
        //! Compressed (33 bytes) public key.
        self.account.public_key.serialize().to_vec()
    }

    pub fn sign(&self, bytes: &[u8]) -> Vec<u8> {
        //! Sign `sha256(bytes)`, returning a 64-byte compact signature.
        let secp = Secp256k1::signing_only();
        let message = Message::from_slice(&sha256(bytes)).expect("Digest is 32 bytes");
        let mut signature: Signature = secp.sign_ecdsa(&message, self.node.private_key());
        signature.normalize_s();
        signature.serialize_compact().to_vec()
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("address", &self.account.address.as_str())
            .finish_non_exhaustive()
    }
}
