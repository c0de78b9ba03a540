//! Notifiers that never leave the process.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::domain::Notification;
use crate::domain::ports::{Notifier, NotifierError};

/// Logs each notification instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifierError> {
        info!(
            to = %notification.to,
            subject = %notification.subject,
            "notification delivery skipped: no mail relay configured"
        );
        Ok(())
    }
}

/// Records notifications; can be switched to fail every delivery.
#[derive(Debug, Default)]
pub struct InMemoryOutbox {
    sent: Mutex<Vec<Notification>>,
    failing: bool,
}

impl InMemoryOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outbox whose every delivery fails as unavailable.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            failing: true,
        }
    }

    /// Snapshot of delivered messages in send order.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for InMemoryOutbox {
    async fn send(&self, notification: &Notification) -> Result<(), NotifierError> {
        if self.failing {
            return Err(NotifierError::unavailable("outbox configured to fail"));
        }
        self.sent
            .lock()
            .map_err(|_| NotifierError::unavailable("outbox lock poisoned"))?
            .push(notification.clone());
        Ok(())
    }
}
