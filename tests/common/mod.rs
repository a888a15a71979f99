use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

pub struct ServerGuard {
    pub base_url: String,
    _scratch: tempfile::TempDir,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn spawn_dev_server() -> Result<ServerGuard> {
    spawn_dev_server_with_groups(&[])
}

/// `groups` are `id=displayName` pairs; empty keeps the built-in directory.
pub fn spawn_dev_server_with_groups(groups: &[&str]) -> Result<ServerGuard> {
    let scratch = tempfile::tempdir().context("create server tempdir")?;
    let addr_file = scratch.path().join("addr.txt");

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bucket-console-dev-server"));
    cmd.arg("--addr")
        .arg("127.0.0.1:0")
        .arg("--addr-file")
        .arg(&addr_file);
    for g in groups {
        cmd.arg("--group").arg(g);
    }
    let child = cmd
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn bucket-console-dev-server")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_health(&base_url)?;

    Ok(ServerGuard {
        base_url,
        _scratch: scratch,
        child,
    })
}

fn read_addr_file(addr_file: &std::path::Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_health(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/health", base_url);
        }
        match client.get(format!("{}/health", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

#[allow(dead_code)]
pub fn auth_header(email: &str) -> String {
    format!("Bearer dev-token-for-{}", email)
}
