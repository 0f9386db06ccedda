//! Cosmos SDK transactions support (`SIGN_MODE_DIRECT`).

use cosmos_sdk_proto::cosmos::bank::v1beta1::MsgSend;
use cosmos_sdk_proto::cosmos::crypto::secp256k1::PubKey;
use cosmos_sdk_proto::cosmos::tx::signing::v1beta1::SignMode;
use cosmos_sdk_proto::cosmos::tx::v1beta1::{
    mode_info, AuthInfo, Fee, ModeInfo, SignDoc, SignerInfo, TxBody, TxRaw,
};
use cosmos_sdk_proto::cosmwasm::wasm::v1::{
    MsgExecuteContract, MsgInstantiateContract, MsgStoreCode,
};
use cosmos_sdk_proto::Any;
use prost::Message;

use crate::coin::Coin;
use crate::hdnode::KeyMaterial;
use crate::utils::tx_hash;

/// Protobuf type URLs of the supported messages.
pub mod type_urls {
    /// Bank transfer
    pub const MSG_SEND: &str = "/cosmos.bank.v1beta1.MsgSend";
    /// Upload contract bytecode
    pub const MSG_STORE_CODE: &str = "/cosmwasm.wasm.v1.MsgStoreCode";
    /// Create a contract from uploaded code
    pub const MSG_INSTANTIATE_CONTRACT: &str = "/cosmwasm.wasm.v1.MsgInstantiateContract";
    /// Call a contract
    pub const MSG_EXECUTE_CONTRACT: &str = "/cosmwasm.wasm.v1.MsgExecuteContract";
    /// secp256k1 public key
    pub const SECP256K1_PUBKEY: &str = "/cosmos.crypto.secp256k1.PubKey";
    /// Plain account
    pub const BASE_ACCOUNT: &str = "/cosmos.auth.v1beta1.BaseAccount";
}

fn proto_coins(coins: Vec<Coin>) -> Vec<cosmos_sdk_proto::cosmos::base::v1beta1::Coin> {
    coins.into_iter().map(Into::into).collect()
}

/// A single message carried by a transaction.
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    /// Transfer tokens.
    Send {
        /// Sender address
        from: String,
        /// Recipient address
        to: String,
        /// Amount
        amount: Vec<Coin>,
    },
    /// Upload contract bytecode.
    StoreCode {
        /// Uploader address
        sender: String,
        /// Wasm bytecode
        wasm_byte_code: Vec<u8>,
    },
    /// Instantiate uploaded code.
    Instantiate {
        /// Instantiator address
        sender: String,
        /// Migration admin, if any
        admin: Option<String>,
        /// Code to instantiate
        code_id: u64,
        /// Human-readable label
        label: String,
        /// JSON init message
        msg: Vec<u8>,
        /// Funds sent to the new contract
        funds: Vec<Coin>,
    },
    /// Execute a contract message.
    Execute {
        /// Caller address
        sender: String,
        /// Contract address
        contract: String,
        /// JSON execute message
        msg: Vec<u8>,
        /// Funds attached to the call
        funds: Vec<Coin>,
    },
}

impl Msg {
    pub fn to_any(&self) -> Any {
        //! Wrap into a protobuf `Any`.
        let (type_url, value) = match self.clone() {
            Self::Send { from, to, amount } => (
                type_urls::MSG_SEND,
                MsgSend {
                    from_address: from,
                    to_address: to,
                    amount: proto_coins(amount),
                }
                .encode_to_vec(),
            ),
            Self::StoreCode {
                sender,
                wasm_byte_code,
            } => (
                type_urls::MSG_STORE_CODE,
                MsgStoreCode {
                    sender,
                    wasm_byte_code,
                    instantiate_permission: None,
                }
                .encode_to_vec(),
            ),
            Self::Instantiate {
                sender,
                admin,
                code_id,
                label,
                msg,
                funds,
            } => (
                type_urls::MSG_INSTANTIATE_CONTRACT,
                MsgInstantiateContract {
                    sender,
                    admin: admin.unwrap_or_default(),
                    code_id,
                    label,
                    msg,
                    funds: proto_coins(funds),
                }
                .encode_to_vec(),
            ),
            Self::Execute {
                sender,
                contract,
                msg,
                funds,
            } => (
                type_urls::MSG_EXECUTE_CONTRACT,
                MsgExecuteContract {
                    sender,
                    contract,
                    msg,
                    funds: proto_coins(funds),
                }
                .encode_to_vec(),
            ),
        };
        Any {
            type_url: type_url.to_string(),
            value,
        }
    }
}

/// Unsigned transaction with everything needed to produce a signature.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    /// Chain identifier
    pub chain_id: String,
    /// On-chain account number of the signer
    pub account_number: u64,
    /// Sequence number of the signer
    pub sequence: u64,
    /// Messages, executed atomically in order
    pub messages: Vec<Msg>,
    /// Free-form memo
    pub memo: String,
    /// Maximal amount of gas to spend
    pub gas_limit: u64,
    /// Fee paid for the gas
    pub fee: Vec<Coin>,
    /// Compressed signer public key
    pub public_key: Vec<u8>,
}

impl Transaction {
    pub fn body(&self) -> TxBody {
        //! Protobuf body.
        TxBody {
            messages: self.messages.iter().map(Msg::to_any).collect(),
            memo: self.memo.clone(),
            ..Default::default()
        }
    }

    pub fn auth_info(&self) -> AuthInfo {
        //! Protobuf signer and fee information.
        let public_key = Any {
            type_url: type_urls::SECP256K1_PUBKEY.to_string(),
            value: PubKey {
                key: self.public_key.clone(),
            }
            .encode_to_vec(),
        };
        AuthInfo {
            signer_infos: vec![SignerInfo {
                public_key: Some(public_key),
                mode_info: Some(ModeInfo {
                    sum: Some(mode_info::Sum::Single(mode_info::Single {
                        mode: SignMode::Direct as i32,
                    })),
                }),
                sequence: self.sequence,
            }],
            fee: Some(Fee {
                amount: proto_coins(self.fee.clone()),
                gas_limit: self.gas_limit,
                payer: String::new(),
                granter: String::new(),
            }),
            ..Default::default()
        }
    }

    pub fn sign_doc_bytes(&self) -> Vec<u8> {
        //! Serialized document covered by the signature.
        SignDoc {
            body_bytes: self.body().encode_to_vec(),
            auth_info_bytes: self.auth_info().encode_to_vec(),
            chain_id: self.chain_id.clone(),
            account_number: self.account_number,
        }
        .encode_to_vec()
    }

    #[must_use]
    pub fn sign(&self, key: &KeyMaterial) -> SignedTransaction {
        //! Produce a broadcastable signed transaction.
        let body_bytes = self.body().encode_to_vec();
        let auth_info_bytes = self.auth_info().encode_to_vec();
        let doc = SignDoc {
            body_bytes: body_bytes.clone(),
            auth_info_bytes: auth_info_bytes.clone(),
            chain_id: self.chain_id.clone(),
            account_number: self.account_number,
        };
        let signature = key.sign(&doc.encode_to_vec());
        SignedTransaction(TxRaw {
            body_bytes,
            auth_info_bytes,
            signatures: vec![signature],
        })
    }

    pub fn to_simulation_bytes(&self) -> Vec<u8> {
        //! Encode with an empty signature, as accepted by the `Simulate` service.
        TxRaw {
            body_bytes: self.body().encode_to_vec(),
            auth_info_bytes: self.auth_info().encode_to_vec(),
            signatures: vec![vec![]],
        }
        .encode_to_vec()
    }
}

/// Signed transaction ready for broadcast.
#[derive(Clone, Debug, PartialEq)]
pub struct SignedTransaction(TxRaw);

impl SignedTransaction {
    pub fn to_broadcastable_bytes(&self) -> Vec<u8> {
        //! Protobuf `TxRaw` bytes.
        self.0.encode_to_vec()
    }

    pub fn hash(&self) -> String {
        //! Hash the node will report for this transaction.
        tx_hash(self.to_broadcastable_bytes())
    }

    pub fn signature(&self) -> &[u8] {
        //! Signature of the only signer.
        &self.0.signatures[0]
    }
}
