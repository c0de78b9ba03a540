//! Correlation identifier shared by a request's log lines and error bodies.
//!
//! The [`Trace`](crate::Trace) middleware picks one identifier per request,
//! adopting a well-formed `trace-id` sent by an upstream proxy so a single
//! identifier spans the whole call chain. Errors read it back through
//! [`TraceId::current`]; task-locals do not follow `tokio::spawn`, so spawned
//! work must re-enter [`TraceId::scope`].

use std::fmt;
use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// Request correlation identifier.
///
/// # Examples
/// ```
/// use jobboard::TraceId;
///
/// let upstream = "9b2f1c52-3f0e-4f7a-8d0c-1a2b3c4d5e6f";
/// assert_eq!(TraceId::for_request(Some(upstream)).to_string(), upstream);
/// assert_ne!(TraceId::for_request(Some("junk")).to_string(), "junk");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Adopt `upstream` when it is a UUID, otherwise mint a fresh identifier.
    #[must_use]
    pub fn for_request(upstream: Option<&str>) -> Self {
        upstream
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .filter(|uuid| !uuid.is_nil())
            .map_or_else(|| Self(Uuid::new_v4()), Self)
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut: Future>(trace_id: Self, fut: Fut) -> Fut::Output {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}
