//! External site-server lifecycle.
//!
//! `folio server` manages the site-server binary configured in `folio.yml`
//! as a detached child process: stdout and stderr are redirected to the
//! configured log file and the pid is recorded in a pidfile. Stopping and
//! liveness checks go through the `kill` command, so this module is
//! unix-only; the server's own protocol is out of scope here.

use std::fs::OpenOptions;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};

use crate::config::ServerConfig;

pub fn start(config: &ServerConfig) -> Result<()> {
    if let Some(pid) = read_pid(&config.pidfile) {
        if process_alive(pid) {
            bail!("server is already running (pid {pid})");
        }
        // Stale pidfile from a crashed server.
        let _ = std::fs::remove_file(&config.pidfile);
    }

    for path in [&config.pidfile, &config.logfile] {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.logfile)
        .with_context(|| format!("cannot open log file {}", config.logfile.display()))?;
    let log_err = log.try_clone()?;

    let child = Command::new(&config.binary)
        .args(&config.args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(log))
        .stderr(Stdio::from(log_err))
        .spawn()
        .with_context(|| format!("failed to start {}", config.binary.display()))?;

    let pid = child.id();
    std::fs::write(&config.pidfile, pid.to_string())
        .with_context(|| format!("cannot write pidfile {}", config.pidfile.display()))?;

    println!("server started (pid {pid})");
    println!("  log: {}", config.logfile.display());
    Ok(())
}

pub fn stop(config: &ServerConfig) -> Result<()> {
    let Some(pid) = read_pid(&config.pidfile) else {
        println!("server is not running");
        return Ok(());
    };

    if process_alive(pid) {
        signal(pid, "-TERM")?;
        println!("server stopped (pid {pid})");
    } else {
        println!("server is not running (stale pidfile removed)");
    }

    let _ = std::fs::remove_file(&config.pidfile);
    Ok(())
}

pub fn status(config: &ServerConfig) -> Result<()> {
    match read_pid(&config.pidfile) {
        Some(pid) if process_alive(pid) => println!("server is running (pid {pid})"),
        Some(_) => println!("server is not running (stale pidfile)"),
        None => println!("server is not running"),
    }
    Ok(())
}

/// Print the last `lines` lines of the server log.
pub fn logs(config: &ServerConfig, lines: usize) -> Result<()> {
    if !config.logfile.exists() {
        println!("no log file at {}", config.logfile.display());
        return Ok(());
    }

    let content = std::fs::read_to_string(&config.logfile)?;
    let all: Vec<&str> = content.lines().collect();
    let start = all.len().saturating_sub(lines);
    for line in &all[start..] {
        println!("{line}");
    }
    Ok(())
}

fn read_pid(pidfile: &Path) -> Option<u32> {
    std::fs::read_to_string(pidfile)
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Command::new("kill")
        .args(["-0", &pid.to_string()])
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(unix)]
fn signal(pid: u32, sig: &str) -> Result<()> {
    let status = Command::new("kill")
        .args([sig, &pid.to_string()])
        .status()
        .context("failed to run kill")?;
    if !status.success() {
        bail!("kill {sig} {pid} failed");
    }
    Ok(())
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    false
}

#[cfg(not(unix))]
fn signal(_pid: u32, _sig: &str) -> Result<()> {
    bail!("server management is only supported on unix platforms")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_pid_parses_and_rejects() {
        let tmp = tempfile::tempdir().unwrap();
        let pidfile = tmp.path().join("server.pid");

        assert_eq!(read_pid(&pidfile), None);

        std::fs::write(&pidfile, "1234\n").unwrap();
        assert_eq!(read_pid(&pidfile), Some(1234));

        std::fs::write(&pidfile, "not-a-pid").unwrap();
        assert_eq!(read_pid(&pidfile), None);
    }
}
