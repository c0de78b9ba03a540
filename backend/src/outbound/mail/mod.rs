//! Notification adapters.
//!
//! [`HttpMailRelay`] posts messages to a JSON mail relay. [`TracingNotifier`]
//! only logs and is used when no relay is configured. [`InMemoryOutbox`]
//! records messages for assertions.

mod http_relay;
mod memory;

pub use http_relay::HttpMailRelay;
pub use memory::{InMemoryOutbox, TracingNotifier};
