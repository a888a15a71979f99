use super::*;

pub(super) enum ModalKind {
    BucketName,
    ConfirmDelete { name: String },
}

pub(super) struct Modal {
    pub(super) kind: ModalKind,
    pub(super) input: Input,
}

impl Modal {
    pub(super) fn bucket_name() -> Self {
        Self {
            kind: ModalKind::BucketName,
            input: Input::default(),
        }
    }

    pub(super) fn confirm_delete(name: &str) -> Self {
        Self {
            kind: ModalKind::ConfirmDelete {
                name: name.to_string(),
            },
            input: Input::default(),
        }
    }

    fn title(&self) -> &'static str {
        match self.kind {
            ModalKind::BucketName => "Create bucket",
            ModalKind::ConfirmDelete { .. } => "Delete bucket",
        }
    }
}

pub(super) fn draw_modal(frame: &mut ratatui::Frame, modal: &Modal) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 70);
    let h = 7u16.min(area.height);
    let box_area = Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    };

    frame.render_widget(ratatui::widgets::Clear, box_area);
    let block = Block::default().borders(Borders::ALL).title(modal.title());
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    match &modal.kind {
        ModalKind::BucketName => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Length(3)])
                .split(inner);
            frame.render_widget(
                Paragraph::new("Name of the bucket to create (Enter to submit, Esc to cancel):"),
                parts[0],
            );
            frame.render_widget(
                Paragraph::new(modal.input.buf.as_str())
                    .block(Block::default().borders(Borders::ALL).title("Name")),
                parts[1],
            );
            frame.set_cursor_position((parts[1].x + 1 + modal.input.cursor as u16, parts[1].y + 1));
        }
        ModalKind::ConfirmDelete { name } => {
            let lines = vec![
                Line::from(format!("Delete bucket '{}'?", name)),
                Line::from(""),
                Line::from(vec![
                    Span::styled("y", Style::default().fg(Color::Yellow)),
                    Span::raw(" confirm   "),
                    Span::styled("n/Esc", Style::default().fg(Color::Yellow)),
                    Span::raw(" cancel"),
                ]),
            ];
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
        }
    }
}

pub(super) fn handle_modal_key(app: &mut App, key: KeyEvent) {
    let Some(modal) = app.modal.as_mut() else {
        return;
    };
    let next = match &modal.kind {
        ModalKind::BucketName => match key.code {
            KeyCode::Esc => Some(None),
            KeyCode::Enter => Some(Some(BucketAction::Create(Some(modal.input.buf.clone())))),
            code => {
                modal.input.edit(code);
                None
            }
        },
        ModalKind::ConfirmDelete { name } => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                Some(Some(BucketAction::Delete {
                    name: name.clone(),
                    confirmed: true,
                }))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(None),
            _ => None,
        },
    };

    if let Some(action) = next {
        app.modal = None;
        if let Some(action) = action {
            app.pending = Some(Pending::Bucket(action));
        }
    }
}
