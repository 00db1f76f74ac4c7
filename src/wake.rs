// Screen-wake hold - keep the display on while a workout plays
// Best effort: failing to acquire never interrupts playback.

use std::process::Child;

/// Wake hold errors
#[derive(Debug, thiserror::Error)]
pub enum WakeError {
    #[error("Screen wake hold is not supported on this platform")]
    Unsupported,

    #[error("Failed to start inhibitor: {0}")]
    Spawn(#[from] std::io::Error),
}

/// A releasable request to keep the screen awake
pub trait ScreenWake {
    /// Acquire the hold; acquiring twice keeps a single hold
    fn acquire(&mut self) -> Result<(), WakeError>;

    /// Release the hold; releasing without a hold is a no-op
    fn release(&mut self);

    fn is_held(&self) -> bool;
}

/// No-op hold used when the feature is disabled
#[derive(Debug, Default)]
pub struct NoWake;

impl ScreenWake for NoWake {
    fn acquire(&mut self) -> Result<(), WakeError> {
        Ok(())
    }

    fn release(&mut self) {}

    fn is_held(&self) -> bool {
        false
    }
}

/// Holds an idle inhibitor through `systemd-inhibit` for as long as the
/// child process lives
#[derive(Debug, Default)]
pub struct SystemInhibitor {
    child: Option<Child>,
}

impl SystemInhibitor {
    pub fn new() -> Self {
        Self { child: None }
    }
}

impl ScreenWake for SystemInhibitor {
    #[cfg(target_os = "linux")]
    fn acquire(&mut self) -> Result<(), WakeError> {
        use std::process::{Command, Stdio};

        if self.child.is_some() {
            return Ok(());
        }
        let child = Command::new("systemd-inhibit")
            .args([
                "--what=idle",
                "--who=myreps",
                "--why=Workout in progress",
                "--mode=block",
                "sleep",
                "infinity",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::debug!(pid = child.id(), "screen wake hold acquired");
        self.child = Some(child);
        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    fn acquire(&mut self) -> Result<(), WakeError> {
        Err(WakeError::Unsupported)
    }

    fn release(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            tracing::debug!("screen wake hold released");
        }
    }

    fn is_held(&self) -> bool {
        self.child.is_some()
    }
}

impl Drop for SystemInhibitor {
    fn drop(&mut self) {
        self.release();
    }
}
