//! Opening feeds in the browser.
//!
//! The URL is the configured base URL with the feed's path appended.  It is
//! not validated; whatever the user typed is handed to the platform opener.

use std::io;
use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};
use tokio::process::Command;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::feed::FeedRecord;

pub fn feed_url(base_url: &str, feed: &FeedRecord) -> String {
    format!("{base_url}{}", feed.path)
}

/// Hand `url` to the platform's default URL handler.
///
/// The opener's output is discarded so it cannot write over the TUI.  It is
/// waited on by a task on `runtime`, so it never lingers as a zombie.
pub fn open_url(runtime: &Handle, url: &str) -> Result<()> {
    spawn_reaped(runtime, opener(url))
        .with_context(|| format!("failed to launch browser for {url}"))?;
    info!(%url, "opened feed");
    Ok(())
}

/// Spawn `cmd` and wait for it in the background.
///
/// The returned task yields the exit status, or `None` if waiting failed.
fn spawn_reaped(runtime: &Handle, mut cmd: Command) -> io::Result<JoinHandle<Option<ExitStatus>>> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    // Spawning registers the child with the runtime's process driver.
    let mut child = {
        let _entered = runtime.enter();
        cmd.spawn()?
    };

    Ok(runtime.spawn(async move {
        match child.wait().await {
            Ok(status) => {
                if !status.success() {
                    warn!(%status, "browser opener exited with failure");
                }
                Some(status)
            }
            Err(e) => {
                warn!(error = %e, "could not wait for browser opener");
                None
            }
        }
    }))
}

#[cfg(target_os = "macos")]
fn opener(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn opener(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_plain_concatenation() {
        let feed = FeedRecord::new("Tech", "cnn_tech.rss");
        assert_eq!(
            feed_url("http://rss.cnn.com/rss/", &feed),
            "http://rss.cnn.com/rss/cnn_tech.rss"
        );
    }

    #[test]
    fn url_is_not_normalised() {
        let feed = FeedRecord::new("Odd", "/with space");
        assert_eq!(feed_url("http://example.com/", &feed), "http://example.com//with space");
    }

    #[test]
    fn opener_receives_the_url() {
        let cmd = opener("http://example.com/a.rss");
        let args: Vec<_> = cmd.as_std().get_args().collect();
        assert_eq!(args.last().copied(), Some(std::ffi::OsStr::new("http://example.com/a.rss")));
    }

    #[cfg(unix)]
    #[test]
    fn spawned_opener_is_reaped() {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();

        let task = spawn_reaped(rt.handle(), Command::new("true")).unwrap();
        let status = rt.block_on(task).unwrap();

        assert!(status.is_some_and(|s| s.success()));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn reaped_opener_leaves_no_process_entry() {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("pid");

        // The shell records its own pid, which is the spawned child's pid.
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo $$ > \"$0\"").arg(&pid_file);
        let task = spawn_reaped(rt.handle(), cmd).unwrap();
        assert!(rt.block_on(task).unwrap().is_some());

        let pid = std::fs::read_to_string(&pid_file).unwrap();
        let proc_entry = std::path::Path::new("/proc").join(pid.trim());
        assert!(!proc_entry.exists(), "child {} was not reaped", pid.trim());
    }

    #[test]
    fn missing_opener_is_an_error() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let result = spawn_reaped(rt.handle(), Command::new("definitely-not-a-real-opener-binary"));
        assert!(result.is_err());
    }
}
