use lookup_core::{Notification, NotificationLevel, Notifier};

use std::io::{Stderr, Write, stderr};
use std::sync::{Mutex, PoisonError};

use log::warn;

/// Prints notifications as single prefixed lines.
pub struct TerminalNotifier<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalNotifier<Stderr> {
    pub fn stderr() -> Self {
        Self::new(stderr())
    }
}

impl<W: Write + Send> TerminalNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn format_notification(notification: &Notification) -> String {
    let tag = match notification.level {
        NotificationLevel::Info => "info",
        NotificationLevel::Success => " ok ",
        NotificationLevel::Error => "fail",
    };
    format!("[{tag}] {}", notification.message)
}

impl<W: Write + Send> Notifier for TerminalNotifier<W> {
    fn notify(&self, notification: Notification) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{}", format_notification(&notification)) {
            warn!("Failed to print notification: {e}");
        }
    }
}
