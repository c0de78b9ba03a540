//! Port for outbound notifications (email).

use async_trait::async_trait;

use crate::domain::Notification;

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification adapters.
    pub enum NotifierError {
        /// The delivery channel could not be reached.
        Unavailable { message: String } => "notification channel unavailable: {message}",
        /// The channel refused the message.
        Rejected { message: String } => "notification rejected: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `notification`. Retries, if any, are the adapter's concern.
    async fn send(&self, notification: &Notification) -> Result<(), NotifierError>;
}
