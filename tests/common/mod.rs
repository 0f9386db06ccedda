#![allow(dead_code)]

//! In-memory ledger running the entries contract, for integration tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cosmos_sdk_proto::cosmos::auth::v1beta1::{
    BaseAccount, QueryAccountRequest, QueryAccountResponse,
};
use cosmos_sdk_proto::cosmos::bank::v1beta1::{
    MsgSend, QueryBalanceRequest, QueryBalanceResponse,
};
use cosmos_sdk_proto::cosmos::base::abci::v1beta1::GasInfo;
use cosmos_sdk_proto::cosmos::base::v1beta1::Coin as ProtoCoin;
use cosmos_sdk_proto::cosmos::crypto::secp256k1::PubKey;
use cosmos_sdk_proto::cosmos::tx::v1beta1::{
    AuthInfo, SignDoc, SimulateRequest, SimulateResponse, TxBody, TxRaw,
};
use cosmos_sdk_proto::cosmwasm::wasm::v1::{
    ContractInfo, MsgExecuteContract, MsgInstantiateContract, MsgStoreCode,
    QueryContractInfoRequest, QueryContractInfoResponse, QuerySmartContractStateRequest,
    QuerySmartContractStateResponse,
};
use cosmos_sdk_proto::Any;
use cw_devkit::client::SigningClient;
use cw_devkit::contract::ContractGateway;
use cw_devkit::hdnode::KeyMaterial;
use cw_devkit::msg::{
    Entry, ExecuteMsg, InstantiateMsg, ListResponse, Priority, QueryMsg, Status,
};
use cw_devkit::network::{paths, Event, EventAttribute, LedgerTransport, TxResult};
use cw_devkit::transactions::type_urls;
use cw_devkit::{
    sha256, tx_hash, AccountAddress, AddressConvertible, Coin, Error, GasPolicy, Result,
};
use prost::Message;
use secp256k1::{ecdsa::Signature, Message as Digest, PublicKey, Secp256k1};

/// Public BIP-39 test vector, owns the contract in most tests.
pub const OWNER_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
/// Another public BIP-39 test vector.
pub const STRANGER_MNEMONIC: &str =
    "legal winner thank year wave sausage worth useful legal winner thank yellow";

pub const PREFIX: &str = "juno";
pub const DENOM: &str = "ujunox";
pub const WASM: &[u8] = b"\0asm\x01\0\0\0entries";

const SDK: &str = "sdk";
const WASM_SPACE: &str = "wasm";
const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[derive(Debug)]
struct Failure {
    code: u32,
    codespace: &'static str,
    log: String,
}

fn fail(codespace: &'static str, code: u32, log: impl Into<String>) -> Failure {
    Failure {
        code,
        codespace,
        log: log.into(),
    }
}

fn event(kind: &str, attributes: &[(&str, String)]) -> Event {
    Event {
        kind: kind.to_string(),
        attributes: attributes
            .iter()
            .map(|(key, value)| EventAttribute {
                key: key.to_string(),
                value: value.clone(),
            })
            .collect(),
    }
}

fn parse_amount(coin: &ProtoCoin) -> std::result::Result<u128, Failure> {
    coin.amount
        .parse()
        .map_err(|_| fail(SDK, 10, format!("invalid coin amount {:?}", coin.amount)))
}

fn debit(
    balances: &mut BTreeMap<String, u128>,
    denom: &str,
    amount: u128,
) -> std::result::Result<(), Failure> {
    let have = balances.get(denom).copied().unwrap_or(0);
    if have < amount {
        return Err(fail(
            SDK,
            5,
            format!(
                "spendable balance {have}{denom} is smaller than {amount}{denom}: insufficient funds"
            ),
        ));
    }
    balances.insert(denom.to_string(), have - amount);
    Ok(())
}

fn credit(balances: &mut BTreeMap<String, u128>, denom: &str, amount: u128) {
    *balances.entry(denom.to_string()).or_default() += amount;
}

#[derive(Clone, Debug, Default)]
struct AccountState {
    account_number: u64,
    sequence: u64,
    balances: BTreeMap<String, u128>,
}

/// State of one deployed entries contract.
#[derive(Clone, Debug)]
pub struct EntriesContract {
    pub code_id: u64,
    pub creator: String,
    pub admin: String,
    pub label: String,
    pub owner: String,
    pub entries: BTreeMap<u64, Entry>,
    pub balances: BTreeMap<String, u128>,
    entry_seq: u64,
}

impl EntriesContract {
    fn execute(
        &mut self,
        sender: &str,
        msg: ExecuteMsg,
    ) -> std::result::Result<Vec<(&'static str, String)>, Failure> {
        if sender != self.owner {
            return Err(fail(WASM_SPACE, 5, "Unauthorized: execute wasm contract failed"));
        }
        match msg {
            ExecuteMsg::NewEntry {
                description,
                priority,
            } => {
                self.entry_seq += 1;
                let id = self.entry_seq;
                self.entries.insert(
                    id,
                    Entry {
                        id,
                        description,
                        priority: priority.unwrap_or(Priority::Low),
                        status: Status::Pending,
                    },
                );
                Ok(vec![
                    ("method", "execute_create_new_entry".to_string()),
                    ("new_entry_id", id.to_string()),
                ])
            }
            ExecuteMsg::UpdateEntry {
                id,
                description,
                status,
                priority,
            } => {
                let entry = self.entries.get_mut(&id).ok_or_else(|| {
                    fail(
                        WASM_SPACE,
                        5,
                        "entries::state::Entry not found: execute wasm contract failed",
                    )
                })?;
                if let Some(description) = description {
                    entry.description = description;
                }
                if let Some(status) = status {
                    entry.status = status;
                }
                if let Some(priority) = priority {
                    entry.priority = priority;
                }
                Ok(vec![
                    ("method", "execute_update_entry".to_string()),
                    ("updated_entry_id", id.to_string()),
                ])
            }
            ExecuteMsg::DeleteEntry { id } => {
                self.entries.remove(&id);
                Ok(vec![
                    ("method", "execute_delete_entry".to_string()),
                    ("deleted_entry_id", id.to_string()),
                ])
            }
        }
    }

    fn query(&self, msg: QueryMsg) -> std::result::Result<Vec<u8>, Failure> {
        let encoded = match msg {
            QueryMsg::QueryEntry { id } => {
                let entry = self.entries.get(&id).ok_or_else(|| {
                    fail(
                        WASM_SPACE,
                        9,
                        "entries::state::Entry not found: query wasm contract failed",
                    )
                })?;
                serde_json::to_vec(entry)
            }
            QueryMsg::QueryList { start_after, limit } => {
                let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
                let lower = start_after.map_or(0, |id| id.saturating_add(1));
                let entries = self
                    .entries
                    .range(lower..)
                    .take(limit)
                    .map(|(_, entry)| entry.clone())
                    .collect();
                serde_json::to_vec(&ListResponse { entries })
            }
        };
        encoded.map_err(|e| fail(WASM_SPACE, 9, e.to_string()))
    }
}

#[derive(Clone, Debug, Default)]
struct LedgerState {
    height: u64,
    next_account_number: u64,
    accounts: HashMap<String, AccountState>,
    codes: Vec<Vec<u8>>,
    contracts: BTreeMap<String, EntriesContract>,
}

impl LedgerState {
    fn account_mut(&mut self, address: &str) -> &mut AccountState {
        let next = &mut self.next_account_number;
        self.accounts.entry(address.to_string()).or_insert_with(|| {
            *next += 1;
            AccountState {
                account_number: *next,
                ..AccountState::default()
            }
        })
    }

    fn ante(&mut self, tx: &DecodedTx) -> std::result::Result<(), Failure> {
        let account = self.accounts.get_mut(&tx.signer).ok_or_else(|| {
            fail(SDK, 9, format!("account {} not found: unknown address", tx.signer))
        })?;
        if account.sequence != tx.sequence {
            return Err(fail(
                SDK,
                32,
                format!(
                    "account sequence mismatch, expected {}, got {}: incorrect account sequence",
                    account.sequence, tx.sequence
                ),
            ));
        }
        for (denom, amount) in &tx.fee {
            debit(&mut account.balances, denom, *amount)?;
        }
        account.sequence += 1;
        Ok(())
    }

    fn run(&mut self, prefix: &str, tx: &DecodedTx) -> std::result::Result<Vec<Event>, Failure> {
        let mut events = vec![];
        for any in &tx.body.messages {
            events.extend(self.run_message(prefix, &tx.signer, any)?);
        }
        Ok(events)
    }

    fn run_message(
        &mut self,
        prefix: &str,
        signer: &str,
        any: &Any,
    ) -> std::result::Result<Vec<Event>, Failure> {
        let undecodable = |e: prost::DecodeError| fail(SDK, 2, e.to_string());
        match any.type_url.as_str() {
            type_urls::MSG_SEND => {
                let msg = MsgSend::decode(&any.value[..]).map_err(undecodable)?;
                if msg.from_address != signer {
                    return Err(fail(SDK, 4, "pubkey does not match signer address: unauthorized"));
                }
                for coin in &msg.amount {
                    let amount = parse_amount(coin)?;
                    debit(&mut self.account_mut(signer).balances, &coin.denom, amount)?;
                    credit(&mut self.account_mut(&msg.to_address).balances, &coin.denom, amount);
                }
                Ok(vec![event(
                    "transfer",
                    &[
                        ("recipient", msg.to_address.clone()),
                        ("sender", msg.from_address.clone()),
                    ],
                )])
            }
            type_urls::MSG_STORE_CODE => {
                let msg = MsgStoreCode::decode(&any.value[..]).map_err(undecodable)?;
                if msg.wasm_byte_code.is_empty() {
                    return Err(fail(WASM_SPACE, 2, "empty wasm code: create wasm contract failed"));
                }
                self.codes.push(msg.wasm_byte_code);
                Ok(vec![event(
                    "store_code",
                    &[("code_id", self.codes.len().to_string())],
                )])
            }
            type_urls::MSG_INSTANTIATE_CONTRACT => {
                let msg = MsgInstantiateContract::decode(&any.value[..]).map_err(undecodable)?;
                if msg.code_id == 0 || msg.code_id as usize > self.codes.len() {
                    return Err(fail(WASM_SPACE, 2, "no such code: not found"));
                }
                let init: InstantiateMsg = serde_json::from_slice(&msg.msg).map_err(|e| {
                    fail(
                        WASM_SPACE,
                        4,
                        format!("Error parsing into type InstantiateMsg: {e}: instantiate wasm contract failed"),
                    )
                })?;
                let owner = init.owner.unwrap_or_else(|| signer.to_string());
                owner.parse::<AccountAddress>().map_err(|e| {
                    fail(WASM_SPACE, 4, format!("{e}: instantiate wasm contract failed"))
                })?;
                let seed = format!("contract/{}/{}", msg.code_id, self.contracts.len());
                let address = AccountAddress::from_bytes(prefix, sha256(seed))
                    .map_err(|e| fail(WASM_SPACE, 4, e.to_string()))?
                    .to_string();
                self.contracts.insert(
                    address.clone(),
                    EntriesContract {
                        code_id: msg.code_id,
                        creator: signer.to_string(),
                        admin: msg.admin,
                        label: msg.label,
                        owner: owner.clone(),
                        entries: BTreeMap::new(),
                        balances: BTreeMap::new(),
                        entry_seq: 0,
                    },
                );
                Ok(vec![
                    event(
                        "instantiate",
                        &[
                            ("_contract_address", address.clone()),
                            ("code_id", msg.code_id.to_string()),
                        ],
                    ),
                    event(
                        "wasm",
                        &[
                            ("_contract_address", address),
                            ("method", "instantiate".to_string()),
                            ("owner", owner),
                        ],
                    ),
                ])
            }
            type_urls::MSG_EXECUTE_CONTRACT => {
                let msg = MsgExecuteContract::decode(&any.value[..]).map_err(undecodable)?;
                if !self.contracts.contains_key(&msg.contract) {
                    return Err(fail(WASM_SPACE, 22, "no such contract: not found"));
                }
                for coin in &msg.funds {
                    let amount = parse_amount(coin)?;
                    debit(&mut self.account_mut(signer).balances, &coin.denom, amount)?;
                }
                let execute: ExecuteMsg = serde_json::from_slice(&msg.msg).map_err(|e| {
                    fail(
                        WASM_SPACE,
                        5,
                        format!("Error parsing into type ExecuteMsg: {e}: execute wasm contract failed"),
                    )
                })?;
                let contract = self
                    .contracts
                    .get_mut(&msg.contract)
                    .ok_or_else(|| fail(WASM_SPACE, 22, "no such contract: not found"))?;
                for coin in &msg.funds {
                    credit(&mut contract.balances, &coin.denom, parse_amount(coin)?);
                }
                let mut attributes = vec![("_contract_address", msg.contract.clone())];
                attributes.extend(contract.execute(signer, execute)?);
                Ok(vec![
                    event("execute", &[("_contract_address", msg.contract.clone())]),
                    event("wasm", &attributes),
                ])
            }
            other => Err(fail(SDK, 12, format!("unrecognized message type {other}"))),
        }
    }
}

struct DecodedTx {
    body: TxBody,
    body_bytes: Vec<u8>,
    auth_info_bytes: Vec<u8>,
    signature: Vec<u8>,
    public_key: PublicKey,
    signer: String,
    sequence: u64,
    gas_limit: u64,
    fee: Vec<(String, u128)>,
}

impl DecodedTx {
    fn gas_needed(&self) -> u64 {
        60_000 + 25_000 * self.body.messages.len() as u64
    }
}

/// What happens to the next broadcast.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interruption {
    /// Connection drops before the node sees the transaction.
    Unreachable,
    /// Transaction is committed, but the caller never hears about it.
    TimeoutAfterCommit,
}

/// In-memory ledger with signature and sequence verification.
#[derive(Debug)]
pub struct FakeLedger {
    chain_id: String,
    prefix: String,
    state: Mutex<LedgerState>,
    interruption: Mutex<Option<Interruption>>,
    broadcasts: Mutex<usize>,
}

impl Default for FakeLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeLedger {
    pub const CHAIN_ID: &'static str = "testing-1";

    pub fn new() -> Self {
        Self {
            chain_id: Self::CHAIN_ID.to_string(),
            prefix: PREFIX.to_string(),
            state: Mutex::new(LedgerState::default()),
            interruption: Mutex::new(None),
            broadcasts: Mutex::new(0),
        }
    }

    pub fn fund(&self, address: &AccountAddress, amount: u128) {
        let mut state = self.state.lock().unwrap();
        credit(&mut state.account_mut(address.as_str()).balances, DENOM, amount);
    }

    pub fn balance(&self, address: &AccountAddress) -> u128 {
        let state = self.state.lock().unwrap();
        state
            .accounts
            .get(address.as_str())
            .and_then(|account| account.balances.get(DENOM).copied())
            .unwrap_or(0)
    }

    pub fn sequence_of(&self, address: &AccountAddress) -> Option<u64> {
        let state = self.state.lock().unwrap();
        state.accounts.get(address.as_str()).map(|a| a.sequence)
    }

    pub fn bump_sequence(&self, address: &AccountAddress) {
        //! Pretend another process signed with the same key.
        let mut state = self.state.lock().unwrap();
        state.account_mut(address.as_str()).sequence += 1;
    }

    pub fn broadcasts(&self) -> usize {
        *self.broadcasts.lock().unwrap()
    }

    pub fn contract(&self, address: &AccountAddress) -> Option<EntriesContract> {
        let state = self.state.lock().unwrap();
        state.contracts.get(address.as_str()).cloned()
    }

    pub fn remove_contract(&self, address: &AccountAddress) {
        //! Drop a contract from state, as after a chain reset.
        let mut state = self.state.lock().unwrap();
        state.contracts.remove(address.as_str());
    }

    pub fn interrupt_next_broadcast(&self, interruption: Interruption) {
        *self.interruption.lock().unwrap() = Some(interruption);
    }

    fn decode_tx(&self, bytes: &[u8]) -> std::result::Result<DecodedTx, Failure> {
        let undecodable = |e: prost::DecodeError| fail(SDK, 2, e.to_string());
        let raw = TxRaw::decode(bytes).map_err(undecodable)?;
        let body = TxBody::decode(&raw.body_bytes[..]).map_err(undecodable)?;
        let auth_info = AuthInfo::decode(&raw.auth_info_bytes[..]).map_err(undecodable)?;
        let signer_info = auth_info
            .signer_infos
            .first()
            .ok_or_else(|| fail(SDK, 4, "no signatures supplied"))?;
        let key = signer_info
            .public_key
            .as_ref()
            .filter(|any| any.type_url == type_urls::SECP256K1_PUBKEY)
            .ok_or_else(|| fail(SDK, 4, "unsupported public key"))?;
        let key = PubKey::decode(&key.value[..]).map_err(undecodable)?.key;
        let public_key =
            PublicKey::from_slice(&key).map_err(|e| fail(SDK, 4, e.to_string()))?;
        let signer = public_key
            .address(&self.prefix)
            .map_err(|e| fail(SDK, 4, e.to_string()))?
            .to_string();
        let (gas_limit, fee) = match &auth_info.fee {
            Some(fee) => (
                fee.gas_limit,
                fee.amount
                    .iter()
                    .map(|coin| Ok((coin.denom.clone(), parse_amount(coin)?)))
                    .collect::<std::result::Result<_, Failure>>()?,
            ),
            None => (0, vec![]),
        };
        Ok(DecodedTx {
            body,
            body_bytes: raw.body_bytes,
            auth_info_bytes: raw.auth_info_bytes,
            signature: raw.signatures.into_iter().next().unwrap_or_default(),
            public_key,
            signer,
            sequence: signer_info.sequence,
            gas_limit,
            fee,
        })
    }

    fn verify_signature(
        &self,
        tx: &DecodedTx,
        account_number: u64,
    ) -> std::result::Result<(), Failure> {
        let unauthorized = || {
            fail(
                SDK,
                4,
                format!(
                    "signature verification failed; please verify account number ({account_number}) and chain-id ({}): unauthorized",
                    self.chain_id
                ),
            )
        };
        let doc = SignDoc {
            body_bytes: tx.body_bytes.clone(),
            auth_info_bytes: tx.auth_info_bytes.clone(),
            chain_id: self.chain_id.clone(),
            account_number,
        };
        let digest = Digest::from_slice(&sha256(doc.encode_to_vec())).map_err(|_| unauthorized())?;
        let signature = Signature::from_compact(&tx.signature).map_err(|_| unauthorized())?;
        Secp256k1::verification_only()
            .verify_ecdsa(&digest, &signature, &tx.public_key)
            .map_err(|_| unauthorized())
    }

    fn deliver(&self, tx_bytes: &[u8]) -> std::result::Result<TxResult, Failure> {
        let tx = self.decode_tx(tx_bytes)?;
        let mut state = self.state.lock().unwrap();
        let account_number = state
            .accounts
            .get(&tx.signer)
            .map(|account| account.account_number)
            .ok_or_else(|| fail(SDK, 9, format!("account {} not found", tx.signer)))?;
        self.verify_signature(&tx, account_number)?;

        let mut checked = state.clone();
        checked.ante(&tx)?;
        *state = checked;
        state.height += 1;

        let gas_needed = tx.gas_needed();
        let mut attempt = state.clone();
        let outcome = if tx.gas_limit < gas_needed {
            Err(fail(
                SDK,
                11,
                format!("out of gas: gasWanted: {}, gasUsed: {gas_needed}", tx.gas_limit),
            ))
        } else {
            attempt.run(&self.prefix, &tx)
        };
        let (code, codespace, raw_log, events) = match outcome {
            Ok(events) => {
                *state = attempt;
                (0, "", String::new(), events)
            }
            Err(failure) => (failure.code, failure.codespace, failure.log, vec![]),
        };
        Ok(TxResult {
            hash: tx_hash(tx_bytes),
            height: state.height,
            code,
            codespace: codespace.to_string(),
            raw_log,
            gas_wanted: tx.gas_limit,
            gas_used: gas_needed.min(tx.gas_limit),
            events,
        })
    }

    fn simulate(&self, tx_bytes: &[u8]) -> std::result::Result<u64, Failure> {
        let tx = self.decode_tx(tx_bytes)?;
        let mut state = self.state.lock().unwrap().clone();
        state.ante(&tx)?;
        state.run(&self.prefix, &tx)?;
        Ok(tx.gas_needed())
    }

    fn query(&self, path: &str, data: &[u8]) -> std::result::Result<Vec<u8>, Failure> {
        let undecodable = |e: prost::DecodeError| fail(SDK, 2, e.to_string());
        let state = self.state.lock().unwrap().clone();
        let response = match path {
            paths::ACCOUNT => {
                let request = QueryAccountRequest::decode(data).map_err(undecodable)?;
                let account = state.accounts.get(&request.address).ok_or_else(|| {
                    fail(SDK, 22, format!("account {} not found: key not found", request.address))
                })?;
                QueryAccountResponse {
                    account: Some(Any {
                        type_url: type_urls::BASE_ACCOUNT.to_string(),
                        value: BaseAccount {
                            address: request.address,
                            pub_key: None,
                            account_number: account.account_number,
                            sequence: account.sequence,
                        }
                        .encode_to_vec(),
                    }),
                }
                .encode_to_vec()
            }
            paths::BALANCE => {
                let request = QueryBalanceRequest::decode(data).map_err(undecodable)?;
                let amount = state
                    .accounts
                    .get(&request.address)
                    .and_then(|account| account.balances.get(&request.denom).copied())
                    .unwrap_or(0);
                QueryBalanceResponse {
                    balance: Some(ProtoCoin {
                        denom: request.denom,
                        amount: amount.to_string(),
                    }),
                }
                .encode_to_vec()
            }
            paths::SIMULATE => {
                let request = SimulateRequest::decode(data).map_err(undecodable)?;
                let gas_used = self.simulate(&request.tx_bytes)?;
                SimulateResponse {
                    gas_info: Some(GasInfo {
                        gas_wanted: 0,
                        gas_used,
                    }),
                    result: None,
                }
                .encode_to_vec()
            }
            paths::SMART_CONTRACT_STATE => {
                let request = QuerySmartContractStateRequest::decode(data).map_err(undecodable)?;
                let contract = state
                    .contracts
                    .get(&request.address)
                    .ok_or_else(|| fail(WASM_SPACE, 22, "no such contract: not found"))?;
                let msg: QueryMsg = serde_json::from_slice(&request.query_data).map_err(|e| {
                    fail(WASM_SPACE, 9, format!("Error parsing into type QueryMsg: {e}: query wasm contract failed"))
                })?;
                QuerySmartContractStateResponse {
                    data: contract.query(msg)?,
                }
                .encode_to_vec()
            }
            paths::CONTRACT_INFO => {
                let request = QueryContractInfoRequest::decode(data).map_err(undecodable)?;
                let contract = state
                    .contracts
                    .get(&request.address)
                    .ok_or_else(|| fail(WASM_SPACE, 22, "no such contract: not found"))?;
                QueryContractInfoResponse {
                    address: request.address,
                    contract_info: Some(ContractInfo {
                        code_id: contract.code_id,
                        creator: contract.creator.clone(),
                        admin: contract.admin.clone(),
                        label: contract.label.clone(),
                        ..Default::default()
                    }),
                }
                .encode_to_vec()
            }
            other => return Err(fail(SDK, 6, format!("unknown query path {other}"))),
        };
        Ok(response)
    }
}

#[async_trait]
impl LedgerTransport for FakeLedger {
    async fn chain_id(&self) -> Result<String> {
        Ok(self.chain_id.clone())
    }

    async fn broadcast(&self, tx_bytes: Vec<u8>) -> Result<TxResult> {
        let interruption = self.interruption.lock().unwrap().take();
        if interruption == Some(Interruption::Unreachable) {
            return Err(Error::Unreachable("connection reset by peer".to_string()));
        }
        let result = self.deliver(&tx_bytes).map_err(|f| Error::BroadcastRejected {
            code: f.code,
            codespace: f.codespace.to_string(),
            log: f.log,
        })?;
        *self.broadcasts.lock().unwrap() += 1;
        if interruption == Some(Interruption::TimeoutAfterCommit) {
            return Err(Error::Timeout { hash: result.hash });
        }
        Ok(result)
    }

    async fn abci_query(&self, path: &str, data: Vec<u8>) -> Result<Vec<u8>> {
        self.query(path, &data).map_err(|f| Error::QueryRejected {
            code: f.code,
            codespace: f.codespace.to_string(),
            log: f.log,
        })
    }
}

pub fn client(ledger: &Arc<FakeLedger>, mnemonic: &str) -> Arc<SigningClient> {
    let key = KeyMaterial::derive(mnemonic, PREFIX).unwrap();
    Arc::new(SigningClient::with_transport(
        ledger.clone(),
        key,
        GasPolicy::Auto,
    ))
}

pub fn funded_client(ledger: &Arc<FakeLedger>, mnemonic: &str) -> Arc<SigningClient> {
    let client = client(ledger, mnemonic);
    ledger.fund(client.address(), 100_000_000);
    client
}

pub async fn ready_gateway(client: Arc<SigningClient>) -> ContractGateway {
    let mut gateway = ContractGateway::new(client)
        .with_funds(vec![Coin::new(10000, DENOM)]);
    gateway.upload(WASM.to_vec()).await.unwrap();
    gateway
        .instantiate(&InstantiateMsg::default(), "messages", None)
        .await
        .unwrap();
    gateway.ready().await.unwrap();
    gateway
}
