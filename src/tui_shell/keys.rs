use super::*;

pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }
    if app.modal.is_some() {
        modal::handle_modal_key(app, key);
        return;
    }
    if app.busy() {
        return;
    }

    match app.console.screen() {
        Screen::Login => login_key(app, key),
        Screen::Groups => groups_key(app, key),
        Screen::Buckets => buckets_key(app, key),
    }
}

fn login_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.quit = true,
        KeyCode::Enter => {
            app.pending = Some(Pending::Login(app.email.buf.clone()));
        }
        code => {
            app.email.edit(code);
        }
    }
}

fn groups_key(app: &mut App, key: KeyEvent) {
    if app.filtering {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => app.filtering = false,
            code => {
                if app.filter.edit(code) {
                    app.console.set_group_filter(&app.filter.buf);
                    app.group_cursor = 0;
                }
            }
        }
        return;
    }

    let visible = app.console.directory().visible().len();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Up => app.group_cursor = app.group_cursor.saturating_sub(1),
        KeyCode::Down => {
            if app.group_cursor + 1 < visible {
                app.group_cursor += 1;
            }
        }
        KeyCode::Char(' ') => {
            let member = app
                .console
                .directory()
                .visible()
                .get(app.group_cursor)
                .map(|m| (*m).clone());
            if let Some(member) = member {
                app.console.toggle_group(&member);
            }
        }
        KeyCode::Enter => {
            if !app.console.next() {
                app.set_error("select a group first");
            }
        }
        KeyCode::Char('r') => {
            if !app.console.directory().is_loading() {
                app.refresh_groups();
            }
        }
        KeyCode::Char('/') => app.filtering = true,
        KeyCode::Char('o') => {
            app.console.logout();
            app.set_status("logged out");
        }
        _ => {}
    }
}

fn buckets_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.quit = true;
            return;
        }
        KeyCode::Esc | KeyCode::Char('b') => {
            app.console.back();
            return;
        }
        KeyCode::Char('o') => {
            app.console.logout();
            app.set_status("logged out");
            return;
        }
        _ => {}
    }

    let Some(panel) = app.console.panel() else {
        return;
    };
    let count = panel.buckets().len();
    match key.code {
        KeyCode::Up => app.bucket_cursor = app.bucket_cursor.saturating_sub(1),
        KeyCode::Down => {
            if app.bucket_cursor + 1 < count {
                app.bucket_cursor += 1;
            }
        }
        KeyCode::Char('n') => app.modal = Some(Modal::bucket_name()),
        KeyCode::Char('l') => app.pending = Some(Pending::Bucket(BucketAction::List)),
        KeyCode::Char('x') => app.pending = Some(Pending::Bucket(BucketAction::Clear)),
        KeyCode::Char('d') => {
            if let Some(bucket) = panel.buckets().get(app.bucket_cursor) {
                app.modal = Some(Modal::confirm_delete(&bucket.name));
            }
        }
        _ => {}
    }
}
