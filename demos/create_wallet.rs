//! Generate a fresh Juno wallet.
//!
//! The phrase is written to the file named by `CW_WALLET_FILE` if set,
//! and is never printed.

use cw_devkit::config::ClientConfig;
use cw_devkit::hdnode::{KeyMaterial, MnemonicType};
use rustc_hex::ToHex;

fn create_wallet() -> cw_devkit::Result<()> {
    let (key, phrase) = KeyMaterial::generate(MnemonicType::Words24, ClientConfig::JUNO_PREFIX)?;
    println!("Public key: {}", key.public_key_bytes().to_hex::<String>());
    println!("Address: {}", key.address());
    if let Ok(path) = std::env::var("CW_WALLET_FILE") {
        std::fs::write(&path, phrase.as_bytes())
            .map_err(|e| cw_devkit::Error::Config(format!("{path}: {e}")))?;
        println!("Mnemonic saved to {path}");
    }
    Ok(())
}

#[test]
fn test_run() {
    create_wallet().unwrap();
}

fn main() -> cw_devkit::Result<()> {
    create_wallet()
}
