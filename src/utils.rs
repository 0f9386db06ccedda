use ripemd::Ripemd160;
use rustc_hex::{FromHex, ToHex};
use sha2::{Digest, Sha256};

pub fn sha256<S: AsRef<[u8]>>(bytes: S) -> [u8; 32] {
    //! Compute sha256 digest.
    Sha256::digest(bytes.as_ref()).into()
}

pub fn ripemd160_sha256<S: AsRef<[u8]>>(bytes: S) -> [u8; 20] {
    //! Compute `ripemd160(sha256(bytes))`, the Cosmos account key hash.
    Ripemd160::digest(sha256(bytes)).into()
}

pub fn tx_hash<S: AsRef<[u8]>>(tx_bytes: S) -> String {
    //! Transaction hash as reported by CometBFT: upper-case hex sha256.
    sha256(tx_bytes).to_hex::<String>().to_uppercase()
}

#[doc(hidden)]
pub fn decode_hex(hex: &str) -> Result<Vec<u8>, rustc_hex::FromHexError> {
    //! Decode a hex string, with or without `0x` prefix.
    hex.strip_prefix("0x").unwrap_or(hex).from_hex()
}
