//! Copy-to-clipboard action for code blocks.
//!
//! A copy writes the block text to a [`Clipboard`] and arms a single-shot
//! acknowledgment timer. The acknowledgment is `Copied` or `Failed` until the
//! deadline passes, then reads `Idle` again. Copying again before the
//! deadline restarts the timer instead of stacking a second one.

use crate::log;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Default acknowledgment window.
pub const DEFAULT_ACK_WINDOW: Duration = Duration::from_millis(2000);

/// Clipboard write failures.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Write-only access to a text clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), CopyError>;
}

/// What a copy button currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyStatus {
    Idle,
    Copied,
    Failed(String),
}

/// Per-block acknowledgment state with one restartable deadline.
#[derive(Debug, Clone)]
pub struct CopyAck {
    window: Duration,
    armed: Option<(CopyStatus, Instant)>,
}

impl Default for CopyAck {
    fn default() -> Self {
        Self::new(DEFAULT_ACK_WINDOW)
    }
}

impl CopyAck {
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            armed: None,
        }
    }

    /// Show `status` until `now + window`, replacing any running deadline.
    pub fn arm(&mut self, status: CopyStatus, now: Instant) {
        self.armed = Some((status, now + self.window));
    }

    /// Status as of `now`.
    pub fn status(&self, now: Instant) -> CopyStatus {
        match &self.armed {
            Some((status, deadline)) if now < *deadline => status.clone(),
            _ => CopyStatus::Idle,
        }
    }

    #[cfg(test)]
    pub fn is_copied(&self, now: Instant) -> bool {
        self.status(now) == CopyStatus::Copied
    }
}

/// Text a copy action places on the clipboard: the block source with exactly
/// one trailing newline removed.
pub fn copy_text(source: &str) -> &str {
    source.strip_suffix('\n').unwrap_or(source)
}

/// Copy `source` through `clipboard`, recording the outcome on `ack`.
///
/// Failures are logged and shown as [`CopyStatus::Failed`].
pub fn copy_with_ack<C: Clipboard + ?Sized>(
    clipboard: &mut C,
    source: &str,
    ack: &mut CopyAck,
    now: Instant,
) -> CopyStatus {
    match clipboard.write_text(copy_text(source)) {
        Ok(()) => ack.arm(CopyStatus::Copied, now),
        Err(err) => {
            log!("copy"; "{err}");
            ack.arm(CopyStatus::Failed(err.to_string()), now);
        }
    }
    ack.status(now)
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Clipboard recording every write, optionally failing.
    #[derive(Debug, Default)]
    pub struct MemoryClipboard {
        pub contents: Option<String>,
        pub writes: usize,
        pub fail: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), CopyError> {
            self.writes += 1;
            if self.fail {
                return Err(CopyError::Write("permission denied".into()));
            }
            self.contents = Some(text.to_owned());
            Ok(())
        }
    }
}
