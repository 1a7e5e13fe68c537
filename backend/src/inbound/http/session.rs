//! Session helpers keeping handlers free of Actix session plumbing.
//!
//! Handlers see three operations: remember the authenticated user, read it
//! back, and forget it on logout.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Request extractor wrapping the cookie session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated user in the session cookie, rotating the
    /// session identifier.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// User stored in the session, if any.
    ///
    /// A cookie holding something other than a UUID counts as anonymous.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match UserId::new(&value) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "ignoring malformed user id in session cookie");
                None
            }
        }))
    }

    /// Authenticated user or `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop the session entirely.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Self::new) })
    }
}
