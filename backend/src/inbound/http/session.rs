//! Signed-in state carried by the private session cookie.
//!
//! The cookie holds only the signed-in user's id. Whether that user still
//! exists, and what they may do, is decided later by
//! [`current_principal`](super::auth::current_principal).

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const SIGNED_IN_KEY: &str = "uid";

/// Extractor over the session cookie.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Start a fresh session for `user`. The session id is rotated so a
    /// cookie planted before login cannot ride along.
    pub fn sign_in(&self, user: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(SIGNED_IN_KEY, user.to_string())
            .map_err(|error| Error::internal(format!("failed to start session: {error}")))
    }

    /// The signed-in user, or `None` for anonymous callers. A value that does
    /// not parse is discarded together with the rest of the session.
    pub fn signed_in_user(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(SIGNED_IN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        match UserId::new(&raw) {
            Ok(id) => Ok(Some(id)),
            Err(error) => {
                warn!(%error, "discarding session with malformed user id");
                self.0.purge();
                Ok(None)
            }
        }
    }

    /// End the session and expire the cookie.
    pub fn sign_out(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { session.await.map(Self) })
    }
}
