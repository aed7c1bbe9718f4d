// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification adapters

mod command;
mod desktop;
mod noop;

pub use command::CommandNotifyAdapter;
pub use desktop::DesktopNotifyAdapter;
pub use noop::NoOpNotifyAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from notify operations
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Adapter for sending notifications
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    /// Send a notification with a title and message body
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError>;
}

/// Notification backend selected by configuration
#[derive(Clone, Debug)]
pub enum Notifier {
    Desktop(DesktopNotifyAdapter),
    Command(CommandNotifyAdapter),
    None(NoOpNotifyAdapter),
}

impl Default for Notifier {
    fn default() -> Self {
        Notifier::None(NoOpNotifyAdapter)
    }
}

#[async_trait]
impl NotifyAdapter for Notifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        match self {
            Notifier::Desktop(n) => n.notify(title, message).await,
            Notifier::Command(n) => n.notify(title, message).await,
            Notifier::None(n) => n.notify(title, message).await,
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
