//! Scoped session lifetime
//!
//! A session is disconnected on every exit path once it has connected.

use log::{debug, warn};
use std::ops::{Deref, DerefMut};

use super::{Connector, RemoteSession};
use crate::error::TransferResult;

/// Owns a connected session and disconnects it when dropped.
pub struct SessionGuard<S: RemoteSession> {
    session: Option<S>,
}

impl<S: RemoteSession> SessionGuard<S> {
    pub fn new(session: S) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Disconnect now and surface the result instead of logging it on drop.
    pub fn close(mut self) -> TransferResult<()> {
        match self.session.take() {
            Some(mut session) => session.disconnect(),
            None => Ok(()),
        }
    }
}

impl<S: RemoteSession> Deref for SessionGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        // Only `close` and `drop` take the session, and both consume the guard.
        self.session.as_ref().expect("session present until close")
    }
}

impl<S: RemoteSession> DerefMut for SessionGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        self.session.as_mut().expect("session present until close")
    }
}

impl<S: RemoteSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        if let Some(mut session) = self.session.take() {
            match session.disconnect() {
                Ok(()) => debug!("Disconnected after failed operation"),
                Err(e) => warn!("Disconnect after failed operation failed: {}", e),
            }
        }
    }
}

/// Connect, run `op` against the session, and disconnect.
///
/// A failed connect returns immediately with nothing to tear down. A failed
/// disconnect after a successful `op` is logged and does not change the result.
pub fn with_session<C, T, F>(connector: &C, params: &C::Params, op: F) -> TransferResult<T>
where
    C: Connector,
    F: FnOnce(&mut C::Session) -> TransferResult<T>,
{
    let session = connector.connect(params)?;
    let mut guard = SessionGuard::new(session);

    let outcome = op(&mut *guard)?;

    match guard.close() {
        Ok(()) => debug!("Disconnected"),
        Err(e) => warn!("Disconnect failed: {}", e),
    }

    Ok(outcome)
}
