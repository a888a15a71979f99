use super::*;

const TS_FORMAT: &[time::format_description::FormatItem<'static>] =
    time::macros::format_description!("[hour]:[minute]:[second]");

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    draw_header(frame, chunks[0], app);
    match app.console.screen() {
        Screen::Login => draw_login(frame, chunks[1], app),
        Screen::Groups => draw_groups(frame, chunks[1], app),
        Screen::Buckets => draw_buckets(frame, chunks[1], app),
    }
    draw_footer(frame, chunks[2], app);

    if let Some(modal) = &app.modal {
        modal::draw_modal(frame, modal);
    }
}

fn draw_header(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let screen = match app.console.screen() {
        Screen::Login => "login",
        Screen::Groups => "groups",
        Screen::Buckets => "buckets",
    };
    let mut spans = vec![
        Span::styled(
            "Bucket Console",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(screen, Style::default().fg(Color::Cyan)),
    ];
    if let Some(session) = app.console.session() {
        spans.push(Span::raw("  signed in as "));
        spans.push(Span::styled(
            session.email.as_str(),
            Style::default().fg(Color::Green),
        ));
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_login(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new("Sign in: enter your email"),
        parts[0],
    );
    frame.render_widget(
        Paragraph::new(app.email.buf.as_str())
            .block(Block::default().borders(Borders::ALL).title("Email")),
        parts[1],
    );
    if app.modal.is_none() {
        frame.set_cursor_position((parts[1].x + 1 + app.email.cursor as u16, parts[1].y + 1));
    }

    let note = if matches!(app.pending, Some(Pending::Login(_))) {
        Line::from(Span::styled("signing in...", Style::default().fg(Color::Yellow)))
    } else if let Some(err) = app.console.login_error() {
        Line::from(Span::styled(err, Style::default().fg(Color::Red)))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(note), parts[2]);
    frame.render_widget(
        Paragraph::new("Signing in issues a token used for the protected endpoints.")
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: false }),
        parts[3],
    );
}

fn draw_groups(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let dir = app.console.directory();
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(area);

    let filter_title = if app.filtering { "Filter (editing)" } else { "Filter (/)" };
    frame.render_widget(
        Paragraph::new(app.filter.buf.as_str())
            .block(Block::default().borders(Borders::ALL).title(filter_title)),
        parts[0],
    );
    if app.filtering {
        frame.set_cursor_position((parts[0].x + 1 + app.filter.cursor as u16, parts[0].y + 1));
    }

    let count = if dir.is_loading() {
        "loading...".to_string()
    } else {
        format!("{} items", dir.members().len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Groups / profiles ({})", count));

    if let Some(err) = dir.error() {
        frame.render_widget(
            Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)))
                .wrap(Wrap { trim: false })
                .block(block),
            parts[1],
        );
    } else {
        let visible = dir.visible();
        let items: Vec<ListItem> = if visible.is_empty() {
            let msg = if *dir.state() == FetchState::Loading {
                "loading..."
            } else {
                "no groups found"
            };
            vec![ListItem::new(Span::styled(msg, Style::default().fg(Color::Gray)))]
        } else {
            visible
                .iter()
                .map(|m| {
                    let marker = match (dir.mode(), dir.is_selected(m)) {
                        (SelectMode::Single, true) => "(*) ",
                        (SelectMode::Single, false) => "( ) ",
                        (SelectMode::Multi, true) => "[x] ",
                        (SelectMode::Multi, false) => "[ ] ",
                    };
                    ListItem::new(vec![
                        Line::from(vec![
                            Span::raw(marker),
                            Span::styled(m.label(), Style::default().add_modifier(Modifier::BOLD)),
                        ]),
                        Line::from(Span::styled(
                            format!("    {}", m.detail()),
                            Style::default().fg(Color::Gray),
                        )),
                    ])
                })
                .collect()
        };
        let mut state = ListState::default();
        if !visible.is_empty() {
            state.select(Some(app.group_cursor));
        }
        frame.render_stateful_widget(
            List::new(items)
                .block(block)
                .highlight_style(Style::default().fg(Color::Yellow)),
            parts[1],
            &mut state,
        );
    }

    let selected = match app.console.selected_group() {
        Some(g) => vec![
            Line::from(Span::styled(
                g.label(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("ID: {}", g.id.as_deref().unwrap_or(""))),
        ],
        None => vec![Line::from(Span::styled(
            "no group selected",
            Style::default().fg(Color::Gray),
        ))],
    };
    frame.render_widget(
        Paragraph::new(selected)
            .block(Block::default().borders(Borders::ALL).title("Selected group")),
        parts[2],
    );
}

fn draw_buckets(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let Some(panel) = app.console.panel() else {
        frame.render_widget(
            Paragraph::new(vec![
                Line::from("No group selected."),
                Line::from("Press b to go back to group selection."),
            ])
            .block(Block::default().borders(Borders::ALL).title("Bucket actions")),
            area,
        );
        return;
    };

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    let group = panel.group();
    frame.render_widget(
        Paragraph::new(vec![Line::from(vec![
            Span::styled(group.label(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  ID: {}", group.id.as_deref().unwrap_or(""))),
        ])])
        .block(Block::default().borders(Borders::ALL).title("Selected group")),
        parts[0],
    );

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(parts[1]);

    let items: Vec<ListItem> = if panel.buckets().is_empty() {
        vec![ListItem::new(Span::styled(
            "no buckets listed",
            Style::default().fg(Color::Gray),
        ))]
    } else {
        panel
            .buckets()
            .iter()
            .map(|b| ListItem::new(b.name.as_str()))
            .collect()
    };
    let mut state = ListState::default();
    if !panel.buckets().is_empty() {
        state.select(Some(app.bucket_cursor));
    }
    frame.render_stateful_widget(
        List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Buckets (group)"))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> "),
        cols[0],
        &mut state,
    );

    let lines: Vec<Line> = panel
        .log()
        .lines()
        .map(|l| {
            if l.starts_with("error:") {
                Line::from(Span::styled(l, Style::default().fg(Color::Red)))
            } else {
                Line::from(l)
            }
        })
        .collect();
    // Keep the newest entries in view.
    let inner_h = cols[1].height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(inner_h) as u16;
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(Block::default().borders(Borders::ALL).title("Output / log")),
        cols[1],
    );
}

fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let hints = match app.console.screen() {
        Screen::Login => "Enter sign in  Esc quit",
        Screen::Groups => "Space select  Enter next  / filter  r refresh  o logout  q quit",
        Screen::Buckets => "n create  l list  d delete  x clear  b back  o logout  q quit",
    };

    let mut lines = Vec::new();
    if app.busy() {
        lines.push(Line::from(Span::styled(
            "working...",
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(status) = &app.status {
        let style = if status.error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::White)
        };
        let ts = status.ts.format(TS_FORMAT).unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", ts), Style::default().fg(Color::Gray)),
            Span::styled(status.text.as_str(), style),
        ]));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(hints, Style::default().fg(Color::Gray))));

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::TOP)),
        area,
    );
}
