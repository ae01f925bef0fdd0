//! View models for the portal's screens.
//!
//! Each protected view is mounted through the access gate, runs its remote
//! calls through [`Surface::remote`] and reports every failure to the
//! notifier exactly once. Form input lives in the view and survives
//! failed submissions.

pub mod admin_dashboard;
pub mod admin_offer_letter;
pub mod admin_salary_slip;
pub mod auth;
pub mod employee_home;
pub mod employee_offer_letter;
pub mod employee_salary_slip;

use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

pub use admin_dashboard::AdminDashboard;
pub use admin_offer_letter::AdminOfferLetterView;
pub use admin_salary_slip::AdminSalarySlipView;
pub use auth::{
    AdminLoginForm, AdminRegisterForm, AuthView, EmployeeLoginForm, EmployeeRegisterForm,
};
pub use employee_home::EmployeeHome;
pub use employee_offer_letter::{ApplicationForm, EmployeeOfferLetterView};
pub use employee_salary_slip::EmployeeSalarySlipView;

use crate::api::{ApiClients, ApiError, ApiResult, HttpGateway};
use crate::config::PortalConfig;
use crate::export::{ExportError, ExportPipeline, ExportedDocument};
use crate::gate::{AccessGate, Navigator, Route, SubmitGuard, SubmitTicket};
use crate::notify::Notifier;
use crate::render::DocumentData;
use crate::session::{Role, Session, SessionError, SessionStore};
use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Redirected to {0}")]
    Redirected(Route),
    #[error("{}", .0.summary())]
    Validation(ValidationErrors),
    #[error("{0}")]
    Remote(#[from] ApiError),
    #[error("Failed to download PDF: {0}")]
    Export(#[from] ExportError),
    #[error("A submission is already in progress")]
    Busy,
    #[error("{0}")]
    NotFound(String),
    #[error("failed to update session: {0}")]
    Session(#[from] SessionError),
}

impl ViewError {
    /// True when the view sent the caller elsewhere.
    pub fn redirected(&self) -> bool {
        match self {
            ViewError::Redirected(_) => true,
            ViewError::Remote(e) => e.requires_login(),
            _ => false,
        }
    }
}

impl From<ValidationErrors> for ViewError {
    fn from(errors: ValidationErrors) -> Self {
        ViewError::Validation(errors)
    }
}

/// Everything a view needs from the outside world.
#[derive(Clone)]
pub struct PortalContext {
    pub api: ApiClients,
    pub sessions: SessionStore,
    pub export: ExportPipeline,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

impl PortalContext {
    pub fn new(
        gateway: HttpGateway,
        export: ExportPipeline,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            sessions: gateway.sessions().clone(),
            api: ApiClients::new(gateway),
            export,
            navigator,
            notifier,
        }
    }

    pub fn from_config(
        config: &PortalConfig,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> ApiResult<Self> {
        let sessions = SessionStore::on_disk(&config.session_dir);
        let gateway = HttpGateway::new(config.api_url.clone(), sessions)?;
        Ok(Self::new(
            gateway,
            ExportPipeline::from_config(config),
            navigator,
            notifier,
        ))
    }

    pub fn gate(&self) -> AccessGate {
        AccessGate::new(self.sessions.clone(), self.navigator.clone())
    }

    /// Notify and hand the error back.
    pub(crate) fn fail(&self, err: ViewError) -> ViewError {
        match &err {
            ViewError::Redirected(_) => {}
            ViewError::Validation(_) | ViewError::Busy => log::debug!("{}", err),
            _ => log::error!("{}", err),
        }
        if !matches!(err, ViewError::Redirected(_)) {
            self.notifier.error(&err.to_string());
        }
        err
    }
}

/// A mounted protected view: the gate plus the session it was opened with.
pub(crate) struct Surface {
    ctx: PortalContext,
    gate: AccessGate,
    role: Role,
    session: Session,
}

impl Surface {
    /// Mount for `role`; without a session the caller is redirected and no
    /// request is made.
    pub(crate) fn mount(ctx: PortalContext, role: Role) -> Result<Self, ViewError> {
        let gate = ctx.gate();
        match gate.enter(role) {
            Ok(session) => Ok(Self {
                ctx,
                gate,
                role,
                session,
            }),
            Err(route) => {
                ctx.notifier.error(&ApiError::MissingSession(role).user_message());
                Err(ViewError::Redirected(route))
            }
        }
    }

    pub(crate) fn ctx(&self) -> &PortalContext {
        &self.ctx
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    /// Await a remote call, applying the 401 path and notifying on failure.
    pub(crate) async fn remote<T, F>(&self, call: F) -> Result<T, ViewError>
    where
        F: Future<Output = ApiResult<T>>,
    {
        self.gate
            .settle(self.role, call.await)
            .map_err(|e| self.ctx.fail(ViewError::Remote(e)))
    }

    pub(crate) fn begin(&self, guard: &SubmitGuard) -> Result<SubmitTicket, ViewError> {
        guard.try_begin().ok_or_else(|| self.ctx.fail(ViewError::Busy))
    }

    pub(crate) fn invalid(&self, errors: ValidationErrors) -> ViewError {
        self.ctx.fail(ViewError::Validation(errors))
    }

    pub(crate) fn succeed(&self, message: &str) {
        log::info!("{}", message);
        self.ctx.notifier.success(message);
    }

    pub(crate) fn navigate(&self, route: Route) {
        self.gate.navigate(route);
    }

    pub(crate) async fn download(
        &self,
        document: &DocumentData,
    ) -> Result<ExportedDocument, ViewError> {
        let exported = self
            .ctx
            .export
            .download(document)
            .await
            .map_err(|e| self.ctx.fail(ViewError::Export(e)))?;
        self.succeed(&format!("Downloaded {}", exported.path.display()));
        Ok(exported)
    }

    pub(crate) fn logout(self) -> Result<(), ViewError> {
        self.gate.logout(self.role).map_err(ViewError::from)
    }
}
