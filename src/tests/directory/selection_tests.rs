use super::*;
use serde_json::json;

fn loaded(mode: SelectMode, body: Value) -> GroupDirectory {
    let mut dir = GroupDirectory::new(mode);
    let ticket = dir.begin_fetch();
    dir.apply(FetchReport {
        ticket: ticket.id(),
        outcome: Ok(body),
    });
    dir
}

fn three_groups() -> Value {
    json!({
        "memberOf": [
            { "id": "a", "displayName": "OCI-Administrators-A" },
            { "id": "b", "displayName": "OCI-Administrators-B" },
            { "id": "c", "displayName": "GCP-Administrators-C" },
        ]
    })
}

#[test]
fn single_select_replaces_previous_choice() {
    let mut dir = loaded(SelectMode::Single, three_groups());
    let a = dir.members()[0].clone();
    let b = dir.members()[1].clone();

    assert_eq!(dir.toggle_select(&a), Some(Selection::Single(Some(a.clone()))));
    assert_eq!(dir.toggle_select(&b), Some(Selection::Single(Some(b.clone()))));
    assert_eq!(dir.selected_keys().collect::<Vec<_>>(), vec!["b"]);
    assert!(!dir.is_selected(&a));
    assert!(dir.is_selected(&b));
}

#[test]
fn single_select_reselecting_keeps_choice() {
    let mut dir = loaded(SelectMode::Single, three_groups());
    let a = dir.members()[0].clone();
    dir.toggle_select(&a);
    assert_eq!(dir.toggle_select(&a), Some(Selection::Single(Some(a))));
}

#[test]
fn multi_select_toggle_twice_restores_selection() {
    let mut dir = loaded(SelectMode::Multi, three_groups());
    let a = dir.members()[0].clone();
    let c = dir.members()[2].clone();

    dir.toggle_select(&c);
    let before = dir.current_selection();
    dir.toggle_select(&a);
    assert_eq!(
        dir.current_selection(),
        Selection::Multi(vec![a.clone(), c.clone()])
    );
    dir.toggle_select(&a);
    assert_eq!(dir.current_selection(), before);
}

#[test]
fn member_without_key_is_not_selectable() {
    let mut dir = loaded(SelectMode::Multi, three_groups());
    let nameless = GroupMember::new(None, None);
    assert_eq!(dir.toggle_select(&nameless), None);
    assert_eq!(dir.selected_keys().count(), 0);
}

#[test]
fn refetch_drops_selected_keys_missing_from_new_list() -> anyhow::Result<()> {
    let mut dir = loaded(SelectMode::Multi, three_groups());
    let a = dir.members()[0].clone();
    let b = dir.members()[1].clone();
    dir.toggle_select(&a);
    dir.toggle_select(&b);

    let ticket = dir.begin_fetch();
    let events = dir.apply(FetchReport {
        ticket: ticket.id(),
        outcome: Ok(json!({
            "memberOf": [
                { "id": "b", "displayName": "OCI-Administrators-B" },
                { "id": "d", "displayName": "OCI-Administrators-D" },
            ]
        })),
    });

    assert_eq!(dir.selected_keys().collect::<Vec<_>>(), vec!["b"]);
    match events.as_slice() {
        [DirectoryEvent::SelectionChanged(Selection::Multi(sel))] => {
            assert_eq!(sel, &vec![b]);
        }
        other => anyhow::bail!("unexpected events: {:?}", other),
    }
    Ok(())
}

#[test]
fn text_filter_narrows_visible_without_touching_selection() {
    let mut dir = loaded(SelectMode::Single, three_groups());
    let a = dir.members()[0].clone();
    dir.toggle_select(&a);

    dir.set_filter("gcp");
    let visible: Vec<&str> = dir.visible().iter().map(|m| m.selection_key()).collect();
    assert_eq!(visible, vec!["c"]);
    assert_eq!(dir.filter(), "gcp");
    assert!(dir.is_selected(&a));

    dir.set_filter("");
    assert_eq!(dir.visible().len(), 3);
}

#[test]
fn selection_falls_back_to_display_name_key() {
    let mut dir = loaded(
        SelectMode::Single,
        json!({ "memberOf": [ { "displayName": "OCI-Administrators-NoId" } ] }),
    );
    let m = dir.members()[0].clone();
    dir.toggle_select(&m);
    assert_eq!(
        dir.selected_keys().collect::<Vec<_>>(),
        vec!["OCI-Administrators-NoId"]
    );
}
