use super::*;

/// Identifies one fetch and carries its cancellation flag.
#[derive(Clone, Debug)]
pub struct FetchTicket {
    id: u64,
    cancel: CancelToken,
}

impl FetchTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }
}

/// Result of a fetch, tagged with the ticket that started it.
#[derive(Debug)]
pub struct FetchReport {
    pub ticket: u64,
    pub outcome: Result<Value, ApiError>,
}

impl GroupDirectory {
    /// Starts a fetch: cancels the one in flight, enters `Loading` and
    /// clears any previous error.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        if let Some(prev) = self.in_flight.take() {
            prev.cancel.cancel();
            debug!(ticket = prev.id, "superseded group fetch");
        }
        self.next_ticket += 1;
        let ticket = FetchTicket {
            id: self.next_ticket,
            cancel: CancelToken::new(),
        };
        self.state = FetchState::Loading;
        self.in_flight = Some(ticket.clone());
        ticket
    }

    /// Cancels the fetch in flight, if any. Its report will be discarded.
    pub fn cancel(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            ticket.cancel.cancel();
            self.state = self.settled_state();
            debug!(ticket = ticket.id, "cancelled group fetch");
        }
    }

    /// Applies a fetch report. Reports for cancelled or superseded tickets
    /// leave the directory untouched.
    pub fn apply(&mut self, report: FetchReport) -> Vec<DirectoryEvent> {
        let current = self
            .in_flight
            .as_ref()
            .is_some_and(|t| t.id == report.ticket && !t.cancel.is_cancelled());
        if !current {
            debug!(ticket = report.ticket, "discarding stale group fetch");
            return Vec::new();
        }
        self.in_flight = None;

        match report.outcome {
            Ok(body) => {
                self.members = filter_admin_groups(parse_memberships(&body));
                self.reconcile_selection();
                self.state = FetchState::Loaded;
                self.loaded_once = true;
                info!(count = self.members.len(), "loaded groups");
                vec![DirectoryEvent::SelectionChanged(self.current_selection())]
            }
            Err(ApiError::Aborted) => {
                debug!(ticket = report.ticket, "group fetch aborted");
                self.state = self.settled_state();
                Vec::new()
            }
            Err(err) if err.is_auth() => {
                self.state = FetchState::Errored(AUTH_ERROR_MESSAGE.to_string());
                self.members.clear();
                self.selected.clear();
                if self.reports_auth {
                    vec![DirectoryEvent::AuthFailed]
                } else {
                    warn!(body = %err.body_text(), "auth error calling /user/groups");
                    Vec::new()
                }
            }
            Err(err) => {
                let msg = match err.status() {
                    Some(status) => format!("error {}: {}", status, err.body_text()),
                    None => err.to_string(),
                };
                warn!(error = %msg, "group fetch failed");
                self.state = FetchState::Errored(msg);
                Vec::new()
            }
        }
    }

    /// Runs a fetch to completion on the calling thread.
    pub fn fetch_blocking(&mut self, api: &ApiClient) -> Vec<DirectoryEvent> {
        let ticket = self.begin_fetch();
        let outcome = api.fetch_memberships(ticket.cancel_token());
        self.apply(FetchReport {
            ticket: ticket.id(),
            outcome,
        })
    }

    /// Runs a fetch on a worker thread. The report is sent to `tx` and must be
    /// handed back to [`GroupDirectory::apply`].
    pub fn spawn_fetch(&mut self, api: &ApiClient, tx: Sender<FetchReport>) -> FetchTicket {
        let ticket = self.begin_fetch();
        let worker_ticket = ticket.clone();
        let api = api.clone();
        std::thread::spawn(move || {
            let outcome = api.fetch_memberships(worker_ticket.cancel_token());
            let _ = tx.send(FetchReport {
                ticket: worker_ticket.id(),
                outcome,
            });
        });
        ticket
    }
}

#[cfg(test)]
#[path = "../tests/directory/fetch_tests.rs"]
mod tests;
