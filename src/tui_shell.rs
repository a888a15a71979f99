use std::io::{self, IsTerminal};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use time::OffsetDateTime;

use crate::buckets::ActionOutcome;
use crate::console::{BucketAction, Console, Screen};
use crate::directory::{FetchReport, FetchState, SelectMode};
use crate::remote::ApiClient;
use crate::session_store::SessionStore;
use crate::tui::TuiRunOptions;

mod input;
use input::Input;

mod keys;
mod modal;
use modal::Modal;
mod render;

pub(crate) fn run_with_options(opts: TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("the console requires an interactive terminal (TTY)");
    }

    let mut app = App::load(&opts)?;

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = run_loop(&mut terminal, &mut app);

    app.console.cancel_group_fetch();
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

/// Work deferred by one frame so the busy state is drawn before a blocking
/// call.
#[derive(Debug)]
enum Pending {
    Login(String),
    Bucket(BucketAction),
}

struct StatusLine {
    ts: OffsetDateTime,
    text: String,
    error: bool,
}

struct App {
    console: Console,
    fetch_tx: Sender<FetchReport>,
    fetch_rx: Receiver<FetchReport>,
    last_screen: Option<Screen>,

    email: Input,
    filter: Input,
    filtering: bool,
    group_cursor: usize,
    bucket_cursor: usize,

    modal: Option<Modal>,
    pending: Option<Pending>,
    status: Option<StatusLine>,
    quit: bool,
}

impl App {
    fn load(opts: &TuiRunOptions) -> Result<Self> {
        let cfg = &opts.config;
        let store = SessionStore::open(&cfg.state_dir);
        let api = ApiClient::new(&cfg.base_url)?;
        let mode = if cfg.multi_select {
            SelectMode::Multi
        } else {
            SelectMode::Single
        };
        let mut console = Console::new(store, api, mode);
        console.restore().context("restore session")?;

        let (fetch_tx, fetch_rx) = mpsc::channel();
        Ok(Self {
            console,
            fetch_tx,
            fetch_rx,
            last_screen: None,
            email: Input::default(),
            filter: Input::default(),
            filtering: false,
            group_cursor: 0,
            bucket_cursor: 0,
            modal: None,
            pending: None,
            status: None,
            quit: false,
        })
    }

    fn busy(&self) -> bool {
        self.pending.is_some() || self.console.panel().is_some_and(|p| p.is_busy())
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            ts: OffsetDateTime::now_utc(),
            text: text.into(),
            error: false,
        });
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            ts: OffsetDateTime::now_utc(),
            text: text.into(),
            error: true,
        });
    }

    /// Starts or cancels the group fetch when the screen changes.
    fn sync_screen(&mut self) {
        let screen = self.console.screen();
        if self.last_screen == Some(screen) {
            return;
        }
        if self.last_screen == Some(Screen::Groups) {
            self.console.cancel_group_fetch();
        }
        match screen {
            Screen::Groups => {
                self.group_cursor = 0;
                self.console.spawn_group_fetch(self.fetch_tx.clone());
            }
            Screen::Buckets => {
                self.bucket_cursor = 0;
            }
            Screen::Login => {
                self.filter.clear();
                self.filtering = false;
                self.modal = None;
            }
        }
        self.last_screen = Some(screen);
    }

    fn drain_fetch_reports(&mut self) {
        while let Ok(report) = self.fetch_rx.try_recv() {
            self.console.apply_fetch_report(report);
        }
        let visible = self.console.directory().visible().len();
        self.group_cursor = self.group_cursor.min(visible.saturating_sub(1));
    }

    fn refresh_groups(&mut self) {
        self.console.spawn_group_fetch(self.fetch_tx.clone());
    }

    fn run_pending(&mut self, pending: Pending) {
        match pending {
            Pending::Login(email) => {
                if self.console.login(&email) {
                    self.email.clear();
                    let who = self
                        .console
                        .session()
                        .map(|s| s.email.clone())
                        .unwrap_or_default();
                    self.set_status(format!("signed in as {}", who));
                }
            }
            Pending::Bucket(action) => {
                let Some(outcome) = self.console.run_bucket_action(action) else {
                    self.set_error("no group selected");
                    return;
                };
                match outcome {
                    ActionOutcome::Dismissed => {}
                    ActionOutcome::Completed => self.set_status("done"),
                    ActionOutcome::Rejected(msg) => self.set_error(msg),
                    ActionOutcome::Failed(_) => self.set_error("action failed (see log)"),
                    ActionOutcome::Unauthorized(_) => {
                        self.set_error("session rejected by the server; log in again")
                    }
                }
                let n = self.console.panel().map(|p| p.buckets().len()).unwrap_or(0);
                self.bucket_cursor = self.bucket_cursor.min(n.saturating_sub(1));
            }
        }
    }
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.sync_screen();
        app.drain_fetch_reports();
        app.sync_screen();

        terminal
            .draw(|f| render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if let Some(pending) = app.pending.take() {
            app.run_pending(pending);
            continue;
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => keys::handle_key(app, k),
                _ => {}
            }
        }
    }
}
