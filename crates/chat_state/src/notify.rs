//! Reply notifications
//!
//! Playback is best effort: callers log a failed notification and move on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification playback failed: {0}")]
    Playback(String),

    #[error("Notification output failed: {0}")]
    Io(#[from] std::io::Error),
}

pub trait Notifier: Send + Sync {
    fn notify(&self) -> Result<(), NotifyError>;
}

/// Notifier that never makes a sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self) -> Result<(), NotifyError> {
        Ok(())
    }
}
