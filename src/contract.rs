//! Typed gateway to a deployed entries contract.

use std::fmt;
use std::sync::Arc;

use futures::stream::{self, Stream, TryStreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::address::AccountAddress;
use crate::client::SigningClient;
use crate::coin::Coin;
use crate::error::{Error, Result, WASM_QUERY_FAILED};
use crate::msg::{Entry, ExecuteMsg, InstantiateMsg, ListResponse, Priority, QueryMsg, Status};
use crate::network::TxResult;

/// Event attribute carrying the id of a created entry.
const NEW_ENTRY_EVENT: (&str, &str) = ("wasm", "new_entry_id");

/// Identity of an instantiated contract.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractRef {
    /// Code the contract was created from
    pub code_id: u64,
    /// Contract address
    pub address: AccountAddress,
}

/// Lifecycle of a [`ContractGateway`]. Transitions only move forward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayState {
    /// Nothing uploaded yet
    Unbound,
    /// Bytecode stored on chain
    Uploaded {
        /// Assigned code id
        code_id: u64,
    },
    /// Contract created, not yet confirmed
    Instantiated(ContractRef),
    /// Contract confirmed on chain, accepts entry operations
    Ready(ContractRef),
}

impl GatewayState {
    const fn name(&self) -> &'static str {
        match self {
            Self::Unbound => "unbound",
            Self::Uploaded { .. } => "uploaded",
            Self::Instantiated(_) => "instantiated",
            Self::Ready(_) => "ready",
        }
    }
}

impl fmt::Display for GatewayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbound => f.write_str("unbound"),
            Self::Uploaded { code_id } => write!(f, "uploaded (code {code_id})"),
            Self::Instantiated(contract) | Self::Ready(contract) => {
                write!(f, "{} ({})", self.name(), contract.address)
            }
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct PageCursor {
    start_after: Option<u64>,
    remaining: Option<usize>,
}

/// Typed façade over a [`SigningClient`] for one entries contract.
#[derive(Debug)]
pub struct ContractGateway {
    client: Arc<SigningClient>,
    state: GatewayState,
    funds: Vec<Coin>,
    page_size: u32,
}

impl ContractGateway {
    /// Largest page the deployed contract returns.
    pub const MAX_PAGE_SIZE: u32 = 30;

    pub fn new(client: Arc<SigningClient>) -> Self {
        //! Gateway with nothing deployed yet.
        Self {
            client,
            state: GatewayState::Unbound,
            funds: vec![],
            page_size: Self::MAX_PAGE_SIZE,
        }
    }

    pub fn at(client: Arc<SigningClient>, contract: ContractRef) -> Self {
        //! Gateway bound to an existing deployment.
        //!
        //! Call [`ContractGateway::ready`] before entry operations.
        Self {
            state: GatewayState::Instantiated(contract),
            ..Self::new(client)
        }
    }

    #[must_use]
    pub fn with_funds(mut self, funds: Vec<Coin>) -> Self {
        //! Attach `funds` to every execute call.
        self.funds = funds;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        //! Set the page size used by [`ContractGateway::entries`].
        self.page_size = page_size.clamp(1, Self::MAX_PAGE_SIZE);
        self
    }

    pub const fn state(&self) -> &GatewayState {
        //! Current lifecycle state.
        &self.state
    }

    pub fn client(&self) -> &SigningClient {
        //! Underlying client.
        &self.client
    }

    fn wrong_state(&self, expected: &'static str) -> Error {
        Error::InvalidState {
            expected,
            actual: self.state.to_string(),
        }
    }

    pub fn contract(&self) -> Result<&ContractRef> {
        //! Bound contract, once ready.
        match &self.state {
            GatewayState::Ready(contract) => Ok(contract),
            _ => Err(self.wrong_state("ready")),
        }
    }

    pub async fn upload(&mut self, wasm_byte_code: Vec<u8>) -> Result<u64> {
        //! Store contract bytecode.
        if self.state != GatewayState::Unbound {
            return Err(self.wrong_state("unbound"));
        }
        let code_id = self.client.upload_code(wasm_byte_code).await?;
        self.state = GatewayState::Uploaded { code_id };
        Ok(code_id)
    }

    pub async fn instantiate(
        &mut self,
        init_msg: &InstantiateMsg,
        label: &str,
        admin: Option<&AccountAddress>,
    ) -> Result<ContractRef> {
        //! Create a contract from the uploaded code.
        let GatewayState::Uploaded { code_id } = self.state else {
            return Err(self.wrong_state("uploaded"));
        };
        let contract = self
            .client
            .instantiate(code_id, init_msg, label, admin)
            .await?;
        self.state = GatewayState::Instantiated(contract.clone());
        Ok(contract)
    }

    pub async fn ready(&mut self) -> Result<&ContractRef> {
        //! Confirm the contract exists and runs the expected code.
        let contract = match &self.state {
            GatewayState::Instantiated(contract) => contract.clone(),
            GatewayState::Ready(_) => return self.contract(),
            _ => return Err(self.wrong_state("instantiated")),
        };
        let info = self.client.contract_info(&contract.address).await?;
        if info.code_id != contract.code_id {
            return Err(Error::InvalidState {
                expected: "contract running the bound code id",
                actual: format!(
                    "{} runs code {} instead of {}",
                    contract.address, info.code_id, contract.code_id
                ),
            });
        }
        info!(address = %contract.address, label = %info.label, "contract ready");
        self.state = GatewayState::Ready(contract);
        self.contract()
    }

    pub async fn execute(&self, msg: &ExecuteMsg) -> Result<TxResult> {
        //! Send an arbitrary execute message with the configured funds.
        let contract = self.contract()?;
        self.client
            .execute(
                self.client.address(),
                &contract.address,
                msg,
                self.funds.clone(),
            )
            .await
    }

    pub async fn query<T: serde::de::DeserializeOwned>(&self, msg: &QueryMsg) -> Result<T> {
        //! Send an arbitrary query message.
        let contract = self.contract()?;
        self.client.query(&contract.address, msg).await
    }

    pub async fn new_entry(&self, description: &str, priority: Priority) -> Result<Entry> {
        //! Create an entry and return it as stored.
        let result = self
            .execute(&ExecuteMsg::NewEntry {
                description: description.to_string(),
                priority: Some(priority),
            })
            .await?;
        let (kind, key) = NEW_ENTRY_EVENT;
        let id: u64 = result
            .attribute(kind, key)
            .and_then(|value| value.parse().ok())
            .ok_or_else(|| Error::Decode(format!("no {kind}.{key} event in {}", result.hash)))?;
        debug!(id, "created entry");
        self.get_entry(id)
            .await?
            .ok_or(Error::EntryNotFound(id))
    }

    pub async fn update_entry(
        &self,
        id: u64,
        description: Option<&str>,
        status: Option<Status>,
        priority: Option<Priority>,
    ) -> Result<Entry> {
        //! Change fields of an existing entry and return it as stored.
        //!
        //! The contract itself rejects unknown ids.
        self.execute(&ExecuteMsg::UpdateEntry {
            id,
            description: description.map(ToString::to_string),
            status,
            priority,
        })
        .await?;
        self.get_entry(id)
            .await?
            .ok_or(Error::EntryNotFound(id))
    }

    pub async fn delete_entry(&self, id: u64) -> Result<TxResult> {
        //! Remove an existing entry.
        //!
        //! Fails with [`Error::EntryNotFound`] without broadcasting if the
        //! entry does not exist: the contract would silently accept it.
        if self.get_entry(id).await?.is_none() {
            return Err(Error::EntryNotFound(id));
        }
        self.execute(&ExecuteMsg::DeleteEntry { id }).await
    }

    pub async fn get_entry(&self, id: u64) -> Result<Option<Entry>> {
        //! Fetch one entry; [`None`] if it does not exist.
        match self.query(&QueryMsg::QueryEntry { id }).await {
            Ok(entry) => Ok(Some(entry)),
            Err(Error::ContractQuery {
                code: WASM_QUERY_FAILED,
                message,
            }) if message.contains("not found") => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn list_entries(
        &self,
        start_after: Option<u64>,
        limit: Option<usize>,
    ) -> Result<Vec<Entry>> {
        //! Entries with `id > start_after`, ascending, at most `limit` of them.
        //!
        //! Pages through the contract as needed; without a limit every
        //! remaining entry is returned.
        self.entries(start_after, limit).try_collect().await
    }

    pub async fn list_page(
        &self,
        start_after: Option<u64>,
        limit: Option<u32>,
    ) -> Result<Vec<Entry>> {
        //! Single `query_list` call with the contract's own paging rules.
        //!
        //! The contract returns 10 entries by default and at most 30.
        let response: ListResponse = self
            .query(&QueryMsg::QueryList { start_after, limit })
            .await?;
        Ok(response.entries)
    }

    async fn next_page(
        &self,
        cursor: Option<PageCursor>,
    ) -> Result<Option<(Vec<Entry>, Option<PageCursor>)>> {
        let Some(cursor) = cursor else {
            return Ok(None);
        };
        let requested = match cursor.remaining {
            Some(0) => return Ok(None),
            Some(remaining) => remaining.min(self.page_size as usize),
            None => self.page_size as usize,
        };
        let page = self
            .list_page(cursor.start_after, Some(requested as u32))
            .await?;
        let next = match page.last() {
            Some(last) if page.len() >= requested => Some(PageCursor {
                start_after: Some(last.id),
                remaining: cursor.remaining.map(|r| r.saturating_sub(page.len())),
            }),
            _ => None,
        };
        Ok(Some((page, next)))
    }

    pub fn entries(
        &self,
        start_after: Option<u64>,
        limit: Option<usize>,
    ) -> impl Stream<Item = Result<Entry>> + '_ {
        //! All entries with `id > start_after`, ascending, fetched page by page.
        //!
        //! Stops after `limit` entries or on the first short page.
        let cursor = PageCursor {
            start_after,
            remaining: limit,
        };
        stream::try_unfold(Some(cursor), move |cursor| self.next_page(cursor))
            .map_ok(|page| stream::iter(page.into_iter().map(Ok)))
            .try_flatten()
    }
}
