//! Wire messages of the entries contract.
//!
//! Every variant serializes to exactly the JSON shape the deployed bytecode
//! expects, e.g. `{"new_entry":{"description":"...","priority":"low"}}`.

use serde::{Deserialize, Serialize};

/// Entry urgency.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// low
    Low,
    /// medium
    Medium,
    /// high
    High,
}

/// Entry progress.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not done yet
    Pending,
    /// Finished
    Done,
}

/// A single entry as stored by the contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Contract-assigned identifier, monotonic per contract instance
    pub id: u64,
    /// Free-form text
    pub description: String,
    /// Urgency
    pub priority: Priority,
    /// Progress
    pub status: Status,
}

/// Instantiation message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstantiateMsg {
    /// Contract owner; the instantiating account if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// State-changing messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Create a new entry.
    NewEntry {
        /// Entry text
        description: String,
        /// Urgency
        #[serde(default, skip_serializing_if = "Option::is_none")]
        priority: Option<Priority>,
    },
    /// Change fields of an existing entry; absent fields are kept.
    UpdateEntry {
        /// Entry to update
        id: u64,
        /// New text
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        /// New progress
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<Status>,
        /// New urgency
        #[serde(default, skip_serializing_if = "Option::is_none")]
        priority: Option<Priority>,
    },
    /// Remove an entry.
    DeleteEntry {
        /// Entry to remove
        id: u64,
    },
}

/// Read-only messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Fetch one entry.
    QueryEntry {
        /// Entry to fetch
        id: u64,
    },
    /// Fetch a page of entries with `id > start_after`, ascending.
    QueryList {
        /// Exclusive lower bound
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_after: Option<u64>,
        /// Page size; the contract caps it
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
    },
}

/// Response to [`QueryMsg::QueryList`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    /// Entries ordered by ascending id
    pub entries: Vec<Entry>,
}
