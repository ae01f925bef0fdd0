use parking_lot::Mutex;
use std::sync::Arc;

use super::model::{GateState, Route};
use crate::api::{ApiError, ApiResult};
use crate::session::{Role, Session, SessionError, SessionStore};

/// Receives redirects.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only remembers where it was sent.
#[derive(Debug, Default)]
pub struct RouteLog {
    routes: Mutex<Vec<Route>>,
}

impl RouteLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes.lock().last().copied()
    }

    pub fn history(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }
}

impl Navigator for RouteLog {
    fn navigate(&self, route: Route) {
        log::debug!("Navigating to {}", route);
        self.routes.lock().push(route);
    }
}

/// Per-view session gate.
pub struct AccessGate {
    sessions: SessionStore,
    navigator: Arc<dyn Navigator>,
    state: Mutex<GateState>,
}

impl AccessGate {
    pub fn new(sessions: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            sessions,
            navigator,
            state: Mutex::new(GateState::Unauthenticated),
        }
    }

    pub fn state(&self) -> GateState {
        *self.state.lock()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn navigate(&self, route: Route) {
        self.navigator.navigate(route);
    }

    /// Mount check. Without a session for `role` the caller is sent to the
    /// entry surface and gets the route back instead of a session.
    pub fn enter(&self, role: Role) -> Result<Session, Route> {
        match self.sessions.get(role) {
            Some(session) => {
                *self.state.lock() = GateState::Authenticated(role);
                Ok(session)
            }
            None => {
                log::info!("No {} session, redirecting to {}", role, Route::Entry);
                self.redirect_to_entry();
                Err(Route::Entry)
            }
        }
    }

    /// Pass a remote result through the gate. A 401 clears the session and
    /// redirects before the error is returned.
    pub fn settle<T>(&self, role: Role, result: ApiResult<T>) -> ApiResult<T> {
        if let Err(err) = &result {
            if err.requires_login() {
                self.expire(role, err);
            }
        }
        result
    }

    /// Explicit logout. Always clears and redirects.
    pub fn logout(&self, role: Role) -> Result<(), SessionError> {
        let cleared = self.sessions.clear(role);
        *self.state.lock() = GateState::Unauthenticated;
        self.navigator.navigate(Route::Entry);
        log::info!("{} logged out", role);
        cleared
    }

    fn expire(&self, role: Role, cause: &ApiError) {
        log::warn!("{} session rejected: {}", role, cause);
        if let Err(e) = self.sessions.clear(role) {
            log::error!("Failed to clear {} session: {}", role, e);
        }
        self.redirect_to_entry();
    }

    fn redirect_to_entry(&self) {
        *self.state.lock() = GateState::Unauthenticated;
        self.navigator.navigate(Route::Entry);
    }
}
