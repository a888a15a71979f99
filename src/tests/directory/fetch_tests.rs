use super::*;
use serde_json::json;

fn groups_body() -> Value {
    json!({
        "memberOf": [
            { "id": "a", "displayName": "OCI-Administrators-A" },
            { "id": "x", "displayName": "Engineering" },
        ]
    })
}

fn http_error(status: u16) -> ApiError {
    ApiError::Http {
        status,
        body: json!({ "detail": "nope" }),
    }
}

#[test]
fn begin_fetch_enters_loading_and_clears_error() {
    let mut dir = GroupDirectory::new(SelectMode::Single);
    let ticket = dir.begin_fetch();
    dir.apply(FetchReport {
        ticket: ticket.id(),
        outcome: Err(http_error(500)),
    });
    assert!(dir.error().is_some());

    dir.begin_fetch();
    assert!(dir.is_loading());
    assert_eq!(dir.error(), None);
}

#[test]
fn successful_fetch_loads_admin_groups_and_reports_selection() {
    let mut dir = GroupDirectory::new(SelectMode::Single);
    let ticket = dir.begin_fetch();
    let events = dir.apply(FetchReport {
        ticket: ticket.id(),
        outcome: Ok(groups_body()),
    });

    assert_eq!(dir.state(), &FetchState::Loaded);
    assert_eq!(dir.members().len(), 1);
    assert_eq!(
        events,
        vec![DirectoryEvent::SelectionChanged(Selection::Single(None))]
    );
}

#[test]
fn superseded_fetch_report_is_discarded() {
    let mut dir = GroupDirectory::new(SelectMode::Single);
    let first = dir.begin_fetch();
    let second = dir.begin_fetch();
    assert!(first.cancel_token().is_cancelled());
    assert!(!second.cancel_token().is_cancelled());

    let events = dir.apply(FetchReport {
        ticket: first.id(),
        outcome: Ok(groups_body()),
    });
    assert!(events.is_empty());
    assert!(dir.is_loading());
    assert!(dir.members().is_empty());

    dir.apply(FetchReport {
        ticket: second.id(),
        outcome: Ok(json!({ "memberOf": [] })),
    });
    assert_eq!(dir.state(), &FetchState::Loaded);
    assert!(dir.members().is_empty());
}

#[test]
fn cancelled_fetch_report_is_discarded() {
    let mut dir = GroupDirectory::new(SelectMode::Multi);
    let ticket = dir.begin_fetch();
    dir.cancel();
    assert!(ticket.cancel_token().is_cancelled());
    assert_eq!(dir.state(), &FetchState::Idle);

    let events = dir.apply(FetchReport {
        ticket: ticket.id(),
        outcome: Err(http_error(401)),
    });
    assert!(events.is_empty());
    assert_eq!(dir.state(), &FetchState::Idle);
    assert_eq!(dir.error(), None);
}

#[test]
fn cancel_after_load_returns_to_loaded() {
    let mut dir = GroupDirectory::new(SelectMode::Single);
    let ticket = dir.begin_fetch();
    dir.apply(FetchReport {
        ticket: ticket.id(),
        outcome: Ok(groups_body()),
    });

    dir.begin_fetch();
    dir.cancel();
    assert_eq!(dir.state(), &FetchState::Loaded);
    assert_eq!(dir.members().len(), 1);
}

#[test]
fn auth_failure_clears_list_and_notifies_handler() {
    for status in [401, 403] {
        let mut dir = GroupDirectory::new(SelectMode::Single).with_auth_handler();
        let ticket = dir.begin_fetch();
        dir.apply(FetchReport {
            ticket: ticket.id(),
            outcome: Ok(groups_body()),
        });

        let ticket = dir.begin_fetch();
        let events = dir.apply(FetchReport {
            ticket: ticket.id(),
            outcome: Err(http_error(status)),
        });
        assert_eq!(events, vec![DirectoryEvent::AuthFailed]);
        assert_eq!(dir.error(), Some(AUTH_ERROR_MESSAGE));
        assert!(dir.members().is_empty());
    }
}

#[test]
fn auth_failure_without_handler_only_sets_error() {
    let mut dir = GroupDirectory::new(SelectMode::Multi);
    let ticket = dir.begin_fetch();
    dir.apply(FetchReport {
        ticket: ticket.id(),
        outcome: Ok(groups_body()),
    });
    let a = dir.members()[0].clone();
    dir.toggle_select(&a);

    let ticket = dir.begin_fetch();
    let events = dir.apply(FetchReport {
        ticket: ticket.id(),
        outcome: Err(http_error(403)),
    });
    assert!(events.is_empty());
    assert_eq!(dir.error(), Some(AUTH_ERROR_MESSAGE));
    assert!(dir.members().is_empty());
    assert_eq!(dir.selected_keys().count(), 0);

    // A later fetch returning the same group does not revive the old choice.
    let ticket = dir.begin_fetch();
    dir.apply(FetchReport {
        ticket: ticket.id(),
        outcome: Ok(groups_body()),
    });
    assert!(!dir.is_selected(&a));
    assert_eq!(dir.current_selection(), Selection::Multi(Vec::new()));
}

#[test]
fn other_http_error_includes_status_and_body() {
    let mut dir = GroupDirectory::new(SelectMode::Single);
    let ticket = dir.begin_fetch();
    dir.apply(FetchReport {
        ticket: ticket.id(),
        outcome: Err(ApiError::Http {
            status: 502,
            body: json!({ "raw": "bad gateway" }),
        }),
    });
    assert_eq!(dir.error(), Some("error 502: bad gateway"));
}

#[test]
fn aborted_fetch_settles_quietly() {
    let mut dir = GroupDirectory::new(SelectMode::Single);
    let ticket = dir.begin_fetch();
    let events = dir.apply(FetchReport {
        ticket: ticket.id(),
        outcome: Err(ApiError::Aborted),
    });
    assert!(events.is_empty());
    assert_eq!(dir.state(), &FetchState::Idle);
}

#[test]
fn reset_drops_members_selection_and_filter() {
    let mut dir = GroupDirectory::new(SelectMode::Single);
    let ticket = dir.begin_fetch();
    dir.apply(FetchReport {
        ticket: ticket.id(),
        outcome: Ok(groups_body()),
    });
    let a = dir.members()[0].clone();
    dir.toggle_select(&a);
    dir.set_filter("oci");

    dir.reset();
    assert_eq!(dir.state(), &FetchState::Idle);
    assert!(dir.members().is_empty());
    assert_eq!(dir.selected_keys().count(), 0);
    assert_eq!(dir.filter(), "");
}

#[test]
fn blocking_fetch_against_unreachable_host_reports_error() -> anyhow::Result<()> {
    let api = ApiClient::new("http://127.0.0.1:9")?.with_token(Some("t".to_string()));
    let mut dir = GroupDirectory::new(SelectMode::Single);
    let events = dir.fetch_blocking(&api);
    assert!(events.is_empty());
    assert!(dir.error().is_some());
    Ok(())
}
