//! Reqwest-backed notifier for a JSON mail relay.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use tracing::debug;

use crate::domain::Notification;
use crate::domain::ports::{Notifier, NotifierError};

/// Request body accepted by the relay.
#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Notifier that hands each message to an HTTP mail relay.
pub struct HttpMailRelay {
    client: Client,
    endpoint: Url,
    sender: String,
}

impl HttpMailRelay {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        sender: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            sender: sender.into(),
        })
    }

    fn message<'a>(&'a self, notification: &'a Notification) -> RelayMessage<'a> {
        RelayMessage {
            from: &self.sender,
            to: notification.to.as_ref(),
            subject: &notification.subject,
            body: &notification.body,
        }
    }
}

#[async_trait]
impl Notifier for HttpMailRelay {
    async fn send(&self, notification: &Notification) -> Result<(), NotifierError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&self.message(notification))
            .send()
            .await
            .map_err(|error| NotifierError::unavailable(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(to = %notification.to, subject = %notification.subject, "notification relayed");
            return Ok(());
        }
        Err(map_status_error(status))
    }
}

fn map_status_error(status: StatusCode) -> NotifierError {
    let message = format!("relay answered with status {}", status.as_u16());
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        NotifierError::unavailable(message)
    } else {
        NotifierError::rejected(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmailAddress, Username};
    use rstest::rstest;

    #[rstest]
    fn relay_message_carries_sender_and_notification() {
        let relay = HttpMailRelay::new(
            Url::parse("http://relay.local/send").expect("url"),
            "noreply@jobs.example",
            Duration::from_secs(1),
        )
        .expect("client");
        let notification = Notification::welcome(
            EmailAddress::new("ada@example.com").expect("email"),
            &Username::new("ada").expect("username"),
        );

        let body = serde_json::to_value(relay.message(&notification)).expect("serialise");
        assert_eq!(body["from"], "noreply@jobs.example");
        assert_eq!(body["to"], "ada@example.com");
        assert_eq!(body["subject"], notification.subject.as_str());
    }

    #[rstest]
    #[case(StatusCode::BAD_GATEWAY, true)]
    #[case(StatusCode::TOO_MANY_REQUESTS, true)]
    #[case(StatusCode::UNPROCESSABLE_ENTITY, false)]
    fn status_errors_split_by_retryability(#[case] status: StatusCode, #[case] unavailable: bool) {
        assert_eq!(
            matches!(map_status_error(status), NotifierError::Unavailable { .. }),
            unavailable
        );
    }
}
