use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bucket_console::buckets::{ActionOutcome, BucketPanel};
use bucket_console::config::{ApiProfile, ConsoleConfig};
use bucket_console::directory::{DirectoryEvent, GroupDirectory, SelectMode};
use bucket_console::model::GroupMember;
use bucket_console::remote::ApiClient;
use bucket_console::session_store::SessionStore;
use bucket_console::tui::TuiRunOptions;

#[derive(Parser)]
#[command(name = "bucket-console")]
#[command(about = "Group-scoped storage bucket administration console", long_about = None)]
struct Cli {
    /// Base URL of the backend API (overrides the profile's environment variable)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// How a missing base URL is treated (defaults depend on the command)
    #[arg(long, global = true, value_enum)]
    profile: Option<ApiProfile>,

    /// Directory holding the persisted session and the log file
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive console (default)
    Tui {
        /// Allow selecting several groups at once
        #[arg(long)]
        multi_select: bool,
    },

    /// Sign in with an email and persist the issued token
    Login {
        #[arg(long)]
        email: String,
    },

    /// Forget the persisted session
    Logout,

    /// Show the persisted session
    Status {
        #[arg(long)]
        json: bool,
    },

    /// List the administrative groups of the signed-in user
    Groups {
        /// Only show groups whose name or id contains this text
        #[arg(long)]
        filter: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Create, list or delete buckets of a group
    Buckets {
        #[command(subcommand)]
        command: BucketCommands,
    },
}

#[derive(Subcommand)]
enum BucketCommands {
    /// List the buckets of a group
    List {
        /// Group id or display name
        #[arg(long)]
        group: String,
        #[arg(long)]
        json: bool,
    },
    /// Create a bucket in a group
    Create {
        #[arg(long)]
        group: String,
        #[arg(long)]
        name: String,
    },
    /// Delete a bucket of a group
    Delete {
        #[arg(long)]
        group: String,
        #[arg(long)]
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui {
        multi_select: false,
    });

    let default_profile = match command {
        Commands::Buckets { .. } => ApiProfile::Strict,
        _ => ApiProfile::Tolerant,
    };
    let cfg = ConsoleConfig::resolve(
        cli.profile.unwrap_or(default_profile),
        cli.api_base.as_deref(),
        cli.state_dir,
    )?;

    match command {
        Commands::Tui { multi_select } => {
            let mut cfg = cfg;
            cfg.multi_select = multi_select;
            let _guard = bucket_console::logging::init_file(&cfg.state_dir)?;
            bucket_console::tui::run_with_options(TuiRunOptions { config: cfg })
        }
        Commands::Login { email } => {
            let (store, mut api) = one_shot(&cfg)?;
            let session = store.login(&mut api, &email)?;
            println!("Logged in as {}", session.email);
            Ok(())
        }
        Commands::Logout => {
            let (store, mut api) = one_shot(&cfg)?;
            store.logout(&mut api)?;
            println!("Logged out");
            Ok(())
        }
        Commands::Status { json } => {
            let (store, _) = one_shot(&cfg)?;
            let session = store.restore()?;
            if json {
                let v = serde_json::json!({
                    "logged_in": session.is_some(),
                    "email": session.as_ref().map(|s| s.email.clone()),
                    "api_base": cfg.base_url,
                    "profile": format!("{:?}", cfg.profile).to_lowercase(),
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&v).context("serialize status json")?
                );
            } else {
                match session {
                    Some(s) => println!("logged in as {}", s.email),
                    None => println!("not logged in"),
                }
            }
            Ok(())
        }
        Commands::Groups { filter, json } => {
            let (store, mut api) = one_shot(&cfg)?;
            require_session(&store, &mut api)?;
            let mut dir = load_groups(&store, &mut api)?;
            dir.set_filter(filter.as_deref().unwrap_or(""));
            let visible: Vec<&GroupMember> = dir.visible();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&visible).context("serialize groups json")?
                );
            } else if visible.is_empty() {
                println!("no groups found");
            } else {
                for m in visible {
                    println!("{}\t{}", m.label(), m.detail());
                }
            }
            Ok(())
        }
        Commands::Buckets { command } => {
            let (store, mut api) = one_shot(&cfg)?;
            run_bucket_command(&store, &mut api, command)
        }
    }
}

/// Stderr logging plus the session store and client for one-shot commands.
fn one_shot(cfg: &ConsoleConfig) -> Result<(SessionStore, ApiClient)> {
    bucket_console::logging::init_stderr()?;
    Ok((
        SessionStore::open(&cfg.state_dir),
        ApiClient::new(&cfg.base_url)?,
    ))
}

fn run_bucket_command(
    store: &SessionStore,
    api: &mut ApiClient,
    command: BucketCommands,
) -> Result<()> {
    let email = require_session(store, api)?;
    let group_ref = match &command {
        BucketCommands::List { group, .. }
        | BucketCommands::Create { group, .. }
        | BucketCommands::Delete { group, .. } => group.clone(),
    };
    let dir = load_groups(store, api)?;
    let group = find_group(&dir, &group_ref)?;
    let mut panel = BucketPanel::new(group, Some(email));

    let (outcome, json) = match command {
        BucketCommands::List { json, .. } => (panel.list(api), json),
        BucketCommands::Create { name, .. } => (panel.create(api, Some(&name)), false),
        BucketCommands::Delete { name, yes, .. } => {
            let confirmed = yes || confirm(&format!("Delete bucket '{}'?", name))?;
            (panel.delete(api, &name, confirmed), false)
        }
    };

    if json && outcome == ActionOutcome::Completed {
        println!(
            "{}",
            serde_json::to_string_pretty(panel.buckets()).context("serialize buckets json")?
        );
    } else {
        for line in panel.log().lines() {
            println!("{}", line);
        }
        for b in panel.buckets() {
            println!("  {}", b.name);
        }
    }

    match outcome {
        ActionOutcome::Completed | ActionOutcome::Dismissed => Ok(()),
        ActionOutcome::Rejected(msg) | ActionOutcome::Failed(msg) => anyhow::bail!(msg),
        ActionOutcome::Unauthorized(msg) => {
            store.logout(api)?;
            anyhow::bail!("{} (session cleared; run `bucket-console login`)", msg)
        }
    }
}

/// Installs the persisted token on `api` and returns the session email.
fn require_session(store: &SessionStore, api: &mut ApiClient) -> Result<String> {
    let Some(session) = store.restore()? else {
        anyhow::bail!("not logged in (run `bucket-console login --email ...`)");
    };
    api.set_token(Some(session.token));
    Ok(session.email)
}

fn load_groups(store: &SessionStore, api: &mut ApiClient) -> Result<GroupDirectory> {
    let mut dir = GroupDirectory::new(SelectMode::Single).with_auth_handler();
    let events = dir.fetch_blocking(api);
    if events.contains(&DirectoryEvent::AuthFailed) {
        store.logout(api)?;
        anyhow::bail!("not authorized (session cleared; run `bucket-console login`)");
    }
    if let Some(err) = dir.error() {
        anyhow::bail!("fetch groups: {}", err);
    }
    Ok(dir)
}

fn find_group(dir: &GroupDirectory, needle: &str) -> Result<GroupMember> {
    dir.members()
        .iter()
        .find(|m| m.id.as_deref() == Some(needle) || m.display_name.as_deref() == Some(needle))
        .cloned()
        .with_context(|| format!("group '{}' not found among your administrative groups", needle))
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush().context("flush stdout")?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read confirmation")?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
