//! Screen routing between login, group selection and bucket actions.
//!
//! `Console` owns the session, the API client and the per-screen state. It
//! is the only writer of the session: login sets it, logout and any
//! authorization failure clear it.

use std::sync::mpsc::Sender;

use anyhow::Result;
use tracing::{info, warn};

use crate::buckets::{ActionOutcome, BucketPanel};
use crate::directory::{DirectoryEvent, FetchReport, GroupDirectory, SelectMode, Selection};
use crate::model::{GroupMember, Session};
use crate::remote::ApiClient;
use crate::session_store::SessionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Groups,
    Buckets,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BucketAction {
    /// `None` when the name prompt was dismissed.
    Create(Option<String>),
    List,
    Delete { name: String, confirmed: bool },
    Clear,
}

pub struct Console {
    store: SessionStore,
    api: ApiClient,
    session: Option<Session>,
    view: Screen,
    directory: GroupDirectory,
    selected_group: Option<GroupMember>,
    panel: Option<BucketPanel>,
    login_error: Option<String>,
}

impl Console {
    pub fn new(store: SessionStore, api: ApiClient, mode: SelectMode) -> Self {
        Self {
            store,
            api,
            session: None,
            view: Screen::Groups,
            directory: GroupDirectory::new(mode).with_auth_handler(),
            selected_group: None,
            panel: None,
            login_error: None,
        }
    }

    /// Re-establishes a persisted session without contacting the server.
    pub fn restore(&mut self) -> Result<bool> {
        let Some(session) = self.store.restore()? else {
            return Ok(false);
        };
        info!(email = %session.email, "restored session");
        self.api.set_token(Some(session.token.clone()));
        self.session = Some(session);
        self.view = Screen::Groups;
        Ok(true)
    }

    pub fn screen(&self) -> Screen {
        match self.session {
            None => Screen::Login,
            Some(_) => self.view,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    /// Returns whether the login succeeded; the failure message is kept for
    /// display.
    pub fn login(&mut self, email: &str) -> bool {
        match self.store.login(&mut self.api, email) {
            Ok(session) => {
                self.session = Some(session);
                self.view = Screen::Groups;
                self.login_error = None;
                true
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                self.login_error = Some(err.to_string());
                false
            }
        }
    }

    /// Clears the session and everything derived from it. Idempotent.
    pub fn logout(&mut self) {
        if let Err(err) = self.store.logout(&mut self.api) {
            warn!(error = %format!("{:#}", err), "clear persisted session");
        }
        self.session = None;
        self.directory.reset();
        self.selected_group = None;
        self.panel = None;
        self.view = Screen::Groups;
    }

    pub fn directory(&self) -> &GroupDirectory {
        &self.directory
    }

    pub fn selected_group(&self) -> Option<&GroupMember> {
        self.selected_group.as_ref()
    }

    pub fn handle_directory_events(&mut self, events: Vec<DirectoryEvent>) {
        for event in events {
            match event {
                DirectoryEvent::SelectionChanged(Selection::Single(member)) => {
                    self.selected_group = member;
                }
                // A list selection never identifies a single group.
                DirectoryEvent::SelectionChanged(Selection::Multi(_)) => {
                    self.selected_group = None;
                }
                DirectoryEvent::AuthFailed => {
                    info!("authorization rejected; forcing logout");
                    self.logout();
                }
            }
        }
    }

    pub fn refresh_groups(&mut self) {
        let events = self.directory.fetch_blocking(&self.api);
        self.handle_directory_events(events);
    }

    pub fn spawn_group_fetch(&mut self, tx: Sender<FetchReport>) {
        self.directory.spawn_fetch(&self.api, tx);
    }

    pub fn apply_fetch_report(&mut self, report: FetchReport) {
        let events = self.directory.apply(report);
        self.handle_directory_events(events);
    }

    pub fn cancel_group_fetch(&mut self) {
        self.directory.cancel();
    }

    pub fn set_group_filter(&mut self, text: &str) {
        self.directory.set_filter(text);
    }

    pub fn toggle_group(&mut self, member: &GroupMember) {
        if let Some(selection) = self.directory.toggle_select(member) {
            self.handle_directory_events(vec![DirectoryEvent::SelectionChanged(selection)]);
        }
    }

    /// Moves to the bucket screen when a group is selected.
    pub fn next(&mut self) -> bool {
        let Some(group) = self.selected_group.clone() else {
            return false;
        };
        if self.screen() != Screen::Groups {
            return false;
        }
        let email = self.session.as_ref().map(|s| s.email.clone());
        self.panel = Some(BucketPanel::new(group, email));
        self.view = Screen::Buckets;
        true
    }

    pub fn back(&mut self) {
        self.panel = None;
        self.view = Screen::Groups;
    }

    pub fn panel(&self) -> Option<&BucketPanel> {
        self.panel.as_ref()
    }

    /// Runs one bucket action. Without a panel (no group selected) nothing
    /// happens; an authorization failure forces logout.
    pub fn run_bucket_action(&mut self, action: BucketAction) -> Option<ActionOutcome> {
        let panel = self.panel.as_mut()?;
        let outcome = match action {
            BucketAction::Create(name) => panel.create(&self.api, name.as_deref()),
            BucketAction::List => panel.list(&self.api),
            BucketAction::Delete { name, confirmed } => panel.delete(&self.api, &name, confirmed),
            BucketAction::Clear => {
                panel.clear();
                ActionOutcome::Completed
            }
        };
        if let ActionOutcome::Unauthorized(_) = outcome {
            self.logout();
        }
        Some(outcome)
    }
}

#[cfg(test)]
#[path = "tests/console_tests.rs"]
mod tests;
