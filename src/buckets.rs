//! Bucket actions for one selected group, with a local mirror of the bucket
//! list and an append-only operation log.

use serde_json::Value;
use tracing::{info, warn};

use crate::model::{Bucket, GroupMember, normalize_bucket_list};
use crate::remote::{ApiClient, ApiError};

/// Append-only, display-only record of action outcomes. Entries may span
/// several lines.
#[derive(Clone, Debug, Default)]
pub struct OperationLog {
    entries: Vec<String>,
}

impl OperationLog {
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().flat_map(|e| e.lines())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The user dismissed the prompt or declined the confirmation.
    Dismissed,
    /// Local validation refused the input; nothing was sent.
    Rejected(String),
    Completed,
    Failed(String),
    /// The server answered 401/403; the session must be dropped.
    Unauthorized(String),
}

pub const EMPTY_NAME_MESSAGE: &str = "bucket name cannot be empty";

#[derive(Clone, Debug)]
pub struct BucketPanel {
    group: GroupMember,
    email: Option<String>,
    buckets: Vec<Bucket>,
    log: OperationLog,
    busy: bool,
}

impl BucketPanel {
    pub fn new(group: GroupMember, email: Option<String>) -> Self {
        Self {
            group,
            email,
            buckets: Vec::new(),
            log: OperationLog::default(),
            busy: false,
        }
    }

    pub fn group(&self) -> &GroupMember {
        &self.group
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn log(&self) -> &OperationLog {
        &self.log
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Creates a bucket named `raw` (trimmed). `None` means the name prompt
    /// was dismissed. Re-lists afterwards when a listing is already shown.
    pub fn create(&mut self, api: &ApiClient, raw: Option<&str>) -> ActionOutcome {
        let Some(raw) = raw else {
            return ActionOutcome::Dismissed;
        };
        let name = raw.trim();
        if name.is_empty() {
            return ActionOutcome::Rejected(EMPTY_NAME_MESSAGE.to_string());
        }

        self.busy = true;
        self.log.push(format!("creating bucket '{}'...", name));
        let payload = serde_json::json!({
            "name": name,
            "group": self.group.display_name,
            "groupId": self.group.id,
            "userEmail": self.email,
        });
        let outcome = match api.create_bucket(&payload) {
            Ok(body) => {
                info!(bucket = name, group = self.group.label(), "created bucket");
                self.log.push(pretty(&body));
                if self.buckets.is_empty() {
                    ActionOutcome::Completed
                } else {
                    match self.list_inner(api) {
                        unauthorized @ ActionOutcome::Unauthorized(_) => unauthorized,
                        _ => ActionOutcome::Completed,
                    }
                }
            }
            Err(err) => self.fail("create", err),
        };
        self.busy = false;
        outcome
    }

    /// Lists buckets for the group and replaces the local mirror.
    pub fn list(&mut self, api: &ApiClient) -> ActionOutcome {
        self.busy = true;
        let outcome = self.list_inner(api);
        self.busy = false;
        outcome
    }

    fn list_inner(&mut self, api: &ApiClient) -> ActionOutcome {
        let group = self.group.display_name.clone().unwrap_or_default();
        self.log
            .push(format!("listing buckets for group '{}'...", group));
        match api.list_buckets(&group) {
            Ok(body) => {
                self.buckets = normalize_bucket_list(&body);
                self.log
                    .push(format!("found {} buckets.", self.buckets.len()));
                ActionOutcome::Completed
            }
            Err(err) => self.fail("list", err),
        }
    }

    /// Deletes `name` once the user has confirmed. On success exactly one
    /// matching entry leaves the mirror; on failure the mirror is untouched.
    pub fn delete(&mut self, api: &ApiClient, name: &str, confirmed: bool) -> ActionOutcome {
        if !confirmed {
            return ActionOutcome::Dismissed;
        }
        self.busy = true;
        self.log.push(format!("deleting bucket '{}'...", name));
        let outcome = match api.delete_bucket(name) {
            Ok(_) => {
                info!(bucket = name, "deleted bucket");
                self.log
                    .push(format!("bucket '{}' deleted successfully.", name));
                remove_first(&mut self.buckets, name);
                ActionOutcome::Completed
            }
            Err(err) => self.fail("delete", err),
        };
        self.busy = false;
        outcome
    }

    /// Empties the mirror and the log.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.log.clear();
    }

    fn fail(&mut self, action: &str, err: ApiError) -> ActionOutcome {
        let msg = err.to_string();
        warn!(action, error = %msg, "bucket action failed");
        self.log.push(format!("error: {}", msg));
        if err.is_auth() {
            ActionOutcome::Unauthorized(msg)
        } else {
            ActionOutcome::Failed(msg)
        }
    }
}

/// Removes the first bucket called `name`; later duplicates stay.
fn remove_first(buckets: &mut Vec<Bucket>, name: &str) -> bool {
    match buckets.iter().position(|b| b.name == name) {
        Some(pos) => {
            buckets.remove(pos);
            true
        }
        None => false,
    }
}

fn pretty(body: &Value) -> String {
    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
#[path = "tests/buckets_tests.rs"]
mod tests;
