//! Authentication helpers used by HTTP handlers.
//!
//! Handlers never interpret the session themselves: they ask for the
//! [`Principal`] behind the cookie and hand it to the driving port, which
//! makes every access decision.

use tracing::debug;

use crate::domain::{Error, Principal};

use super::session::SessionContext;
use super::state::HttpState;

/// Resolve the caller's principal; `None` for anonymous callers.
///
/// A session naming a user that no longer exists is treated as anonymous.
pub async fn current_principal(
    state: &HttpState,
    session: &SessionContext,
) -> Result<Option<Principal>, Error> {
    let Some(user_id) = session.signed_in_user()? else {
        return Ok(None);
    };
    let principal = state.login.principal_for(&user_id).await?;
    if principal.is_none() {
        debug!(%user_id, "session refers to an unknown user");
    }
    Ok(principal)
}
