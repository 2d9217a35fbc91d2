//! Stopping a child process: SIGTERM, a grace period, then SIGKILL.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;
use tokio::process::Child;
use tracing::{debug, warn};

/// How long a server gets to exit after SIGTERM.
pub const GRACE_PERIOD: Duration = Duration::from_secs(5);

/// How a child ended up stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopMethod {
    /// It had exited before we asked.
    AlreadyExited,
    /// It honoured SIGTERM within the grace period.
    Terminated,
    /// It was force-killed.
    Killed,
}

/// Outcome of [`stop_child`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stopped {
    pub status: ExitStatus,
    pub method: StopMethod,
}

/// Stop `child` and reap it.
///
/// On Unix the child gets SIGTERM and `grace` to exit before SIGKILL.
/// Elsewhere there is no graceful signal, so it is killed immediately.
pub async fn stop_child(child: &mut Child, grace: Duration) -> io::Result<Stopped> {
    if let Some(status) = child.try_wait()? {
        return Ok(Stopped {
            status,
            method: StopMethod::AlreadyExited,
        });
    }

    #[cfg(unix)]
    if let Some(stopped) = request_exit(child, grace).await? {
        return Ok(stopped);
    }
    #[cfg(not(unix))]
    let _ = grace;

    child.kill().await?;
    let status = child.wait().await?;
    Ok(Stopped {
        status,
        method: StopMethod::Killed,
    })
}

/// Send SIGTERM and wait up to `grace`. `None` means the child is still up.
#[cfg(unix)]
async fn request_exit(child: &mut Child, grace: Duration) -> io::Result<Option<Stopped>> {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let Some(raw_pid) = child.id() else {
        let status = child.wait().await?;
        return Ok(Some(Stopped {
            status,
            method: StopMethod::AlreadyExited,
        }));
    };
    let pid = Pid::from_raw(i32::try_from(raw_pid).map_err(io::Error::other)?);

    match kill(pid, Signal::SIGTERM) {
        Ok(()) => debug!(pid = raw_pid, "Sent SIGTERM"),
        // Exited between try_wait and kill
        Err(Errno::ESRCH) => {
            let status = child.wait().await?;
            return Ok(Some(Stopped {
                status,
                method: StopMethod::AlreadyExited,
            }));
        }
        Err(e) => return Err(io::Error::other(e)),
    }

    match tokio::time::timeout(grace, child.wait()).await {
        Ok(status) => Ok(Some(Stopped {
            status: status?,
            method: StopMethod::Terminated,
        })),
        Err(_) => {
            warn!(pid = raw_pid, ?grace, "Process ignored SIGTERM, killing it");
            Ok(None)
        }
    }
}

/// Stop `child` with the default [`GRACE_PERIOD`], returning its exit status.
pub async fn shutdown_child(child: &mut Child) -> io::Result<ExitStatus> {
    let stopped = stop_child(child, GRACE_PERIOD).await?;
    debug!(method = ?stopped.method, status = %stopped.status, "Child stopped");
    Ok(stopped.status)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::Stdio;
    use tokio::process::Command;

    fn sh(script: &str) -> Child {
        Command::new("/bin/sh")
            .args(["-c", script])
            .stdout(Stdio::null())
            .spawn()
            .unwrap()
    }

    #[tokio::test]
    async fn sigterm_is_enough_for_a_cooperative_child() {
        let mut child = sh("exec sleep 30");

        let stopped = stop_child(&mut child, GRACE_PERIOD).await.unwrap();

        assert_eq!(stopped.method, StopMethod::Terminated);
        assert!(!stopped.status.success());
    }

    #[tokio::test]
    async fn stubborn_child_is_killed_after_grace() {
        // Ignored dispositions survive exec
        let mut child = sh("trap '' TERM; exec sleep 30");

        let stopped = stop_child(&mut child, Duration::from_millis(200))
            .await
            .unwrap();

        assert_eq!(stopped.method, StopMethod::Killed);
    }

    #[tokio::test]
    async fn exited_child_is_just_reaped() {
        let mut child = sh("exit 4");
        tokio::time::sleep(Duration::from_millis(100)).await;

        let stopped = stop_child(&mut child, GRACE_PERIOD).await.unwrap();

        assert_eq!(stopped.method, StopMethod::AlreadyExited);
        assert_eq!(stopped.status.code(), Some(4));
    }
}
