//! Group directory: the fetch lifecycle and selection state of the caller's
//! administrative groups.
//!
//! Notifications are returned as [`DirectoryEvent`] values from the operations
//! that produce them; the caller decides what a selection change or an auth
//! failure means for the rest of the console.

use std::collections::BTreeSet;
use std::sync::mpsc::Sender;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::model::GroupMember;
use crate::remote::{ApiClient, ApiError, CancelToken};

mod fetch;
pub use self::fetch::{FetchReport, FetchTicket};
mod filter;
pub use self::filter::{
    ADMIN_GROUP_PREFIXES, filter_admin_groups, is_admin_group, matches_filter, parse_memberships,
};
mod selection;

pub const AUTH_ERROR_MESSAGE: &str = "not authorized, please log in again";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectMode {
    Single,
    Multi,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

/// What the caller sees of the selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Single-select: the chosen member, if it is still in the list.
    Single(Option<GroupMember>),
    /// Multi-select: chosen members in list order.
    Multi(Vec<GroupMember>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectoryEvent {
    SelectionChanged(Selection),
    AuthFailed,
}

#[derive(Debug)]
pub struct GroupDirectory {
    mode: SelectMode,
    state: FetchState,
    members: Vec<GroupMember>,
    selected: BTreeSet<String>,
    filter: String,
    in_flight: Option<FetchTicket>,
    next_ticket: u64,
    reports_auth: bool,
    loaded_once: bool,
}

impl GroupDirectory {
    pub fn new(mode: SelectMode) -> Self {
        Self {
            mode,
            state: FetchState::Idle,
            members: Vec::new(),
            selected: BTreeSet::new(),
            filter: String::new(),
            in_flight: None,
            next_ticket: 0,
            reports_auth: false,
            loaded_once: false,
        }
    }

    /// Emit [`DirectoryEvent::AuthFailed`] on 401/403 instead of only
    /// logging the failure.
    pub fn with_auth_handler(mut self) -> Self {
        self.reports_auth = true;
        self
    }

    pub fn mode(&self) -> SelectMode {
        self.mode
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Errored(msg) => Some(msg),
            _ => None,
        }
    }

    /// The full filtered list from the last successful fetch.
    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    /// Drops members, selection and filter; cancels any fetch in flight.
    pub fn reset(&mut self) {
        self.cancel();
        self.members.clear();
        self.selected.clear();
        self.filter.clear();
        self.state = FetchState::Idle;
        self.loaded_once = false;
    }

    fn settled_state(&self) -> FetchState {
        if self.loaded_once {
            FetchState::Loaded
        } else {
            FetchState::Idle
        }
    }
}
