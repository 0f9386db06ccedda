#![doc(html_root_url = "https://docs.rs/cw-devkit/0.1.0-beta.1")]
#![warn(rust_2018_idioms, missing_docs)]
#![deny(dead_code, unused_imports, unused_mut)]

//! Rust library to drive CosmWasm contracts: mnemonic wallets, transaction
//! building, signing and broadcasting, typed contract messages and paginated
//! queries.
//!
//! This library acts primary as a proxy to several underlying libraries
//! (`bip32`, `tiny-bip39`, `secp256k1`, `cosmos-sdk-proto`), with the
//! addition of a signing client and a typed gateway to an "entries"
//! contract.
//!
//! ## Usage
//!
//! One of possible use cases can be transaction creation and signing.
//!
//! Here is how you may approach it. Let's transfer a few tokens to another account.
//!
//! To do so, we need to create a transaction and encode it into broadcastable bytes.
//!
//! ```rust
//! use cw_devkit::hdnode::KeyMaterial;
//! use cw_devkit::transactions::{Msg, Transaction};
//! use cw_devkit::Coin;
//!
//! let key = KeyMaterial::derive(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     "juno",
//! )
//! .expect("Must be correct");
//! let transaction = Transaction {
//!     chain_id: "uni-6".to_string(),
//!     account_number: 12,
//!     sequence: 0,
//!     messages: vec![Msg::Send {
//!         from: key.address().to_string(),
//!         to: key.address().with_prefix("juno").expect("Valid prefix").to_string(),
//!         amount: vec![Coin::new(1000000, "ujunox")],
//!     }],
//!     memo: String::new(),
//!     gas_limit: 100000,
//!     fee: vec!["2500ujunox".parse().expect("Valid coin")],
//!     public_key: key.public_key_bytes(),
//! };
//! let signed = transaction.sign(&key);
//! println!("{}: {:02x?}", signed.hash(), signed.to_broadcastable_bytes());
//! ```
//!
//! Talking to a live node goes through [`client::SigningClient`], and
//! the entries contract is driven by [`contract::ContractGateway`]:
//!
//! ```rust,no_run
//! # async fn run() -> cw_devkit::Result<()> {
//! use std::sync::Arc;
//! use cw_devkit::client::SigningClient;
//! use cw_devkit::config::ClientConfig;
//! use cw_devkit::contract::{ContractGateway, ContractRef};
//! use cw_devkit::msg::Priority;
//!
//! let config = ClientConfig::juno_testnet().with_env_overrides();
//! let client = Arc::new(SigningClient::from_config(&config).await?);
//! let contract = ContractRef {
//!     code_id: 3048,
//!     address: std::env::var("CW_CONTRACT").unwrap_or_default().parse()?,
//! };
//! let mut gateway = ContractGateway::at(client, contract)
//!     .with_funds(vec!["10000ujunox".parse()?]);
//! gateway.ready().await?;
//! let entry = gateway.new_entry("First entry", Priority::Low).await?;
//! println!("{entry:?}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Examples
//!
//! You can check out sample usage of this crate in the [demos/](https://github.com/sterliakov/cw-devkit/tree/master/demos)
//! folder in the project repo on GitHub.
//!
//! ## Readme Docs
//!
//! You can find the crate's readme documentation on the
//! [crates.io] page, or alternatively in the [`README.md`] file on the GitHub project repo.
//!
//! [crates.io]: https://crates.io/crates/cw-devkit
//! [`README.md`]: https://github.com/sterliakov/cw-devkit
//!
//! ### MSRV
//!
//! `cw-devkit` promises to maintain a reasonable MSRV policy. MSRV will not be
//! bumped unless necessary, and such MSRV bumps will only happen in minor or major
//! releases as soon as the first non-beta release goes live. The required version
//! will never be newer than 6 months.
//!
//! Currently it requires rust `1.75.0` or higher to build.
//!
//! ## Contributing
//!
//! Contributions are welcome! Open a pull request to fix a bug, or [open an issue][]
//! to discuss a new feature or change.
//!
//! Check out the [Contributing][] section in the docs for more info.
//!
//! [Contributing]: https://github.com/sterliakov/cw-devkit/blob/master/CONTRIBUTING.md
//! [open an issue]: https://github.com/sterliakov/cw-devkit/issues
//!
//! ## License
//!
//! This project is proudly licensed under the GNU General Public License v3 ([LICENSE](https://github.com/sterliakov/cw-devkit/blob/master/LICENSE)).
//!
//! `cw-devkit` can be distributed according to the GNU General Public License v3. Contributions
//! will be accepted under the same license.

pub mod address;
pub use address::{AccountAddress, AddressConvertible, PrivateKey, PublicKey};
pub mod client;
mod coin;
pub use coin::{Coin, GasPolicy, GasPrice, DEFAULT_GAS_MULTIPLIER};
pub mod config;
pub mod contract;
mod error;
pub use error::*;
#[cfg(feature = "http")]
pub mod faucet;
pub mod hdnode;
pub mod msg;
pub mod network;
#[cfg(feature = "http")]
pub mod rpc;
pub mod transaction_builder;
pub mod transactions;
mod utils;
#[doc(hidden)]
pub use utils::decode_hex;
pub use utils::{ripemd160_sha256, sha256, tx_hash};
