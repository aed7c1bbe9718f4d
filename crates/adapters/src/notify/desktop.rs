// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop notification adapter using notify-rust.
//!
//! On macOS the first notification looks up a bundle identifier through
//! AppleScript, which blocks forever in a daemon without Automation
//! permissions. The identifier is set up front to skip that lookup.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;

const APP_NAME: &str = "pm";

#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifyAdapter;

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let title = title.to_string();
        let message = message.to_string();
        // show() is synchronous; keep it off the runtime threads
        tokio::task::spawn_blocking(move || {
            let shown = notify_rust::Notification::new()
                .appname(APP_NAME)
                .summary(&title)
                .body(&message)
                .show();
            match shown {
                Ok(_) => tracing::debug!(%title, "desktop notification sent"),
                Err(e) => tracing::warn!(%title, error = %e, "desktop notification failed"),
            }
        });
        Ok(())
    }
}
