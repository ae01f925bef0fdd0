use super::{PortalContext, ViewError};
use crate::api::{AdminRegistration, EmployeeRegistration};
use crate::gate::{Route, SubmitGuard};
use crate::session::{Role, Session};
use crate::validation::{
    validate_confirmation, validate_password, validate_required, ValidationErrors,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminLoginForm {
    pub email: String,
    pub password: String,
}

impl AdminLoginForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.email, "email", "Email", &mut errors);
        validate_password(&self.password, "password", &mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeLoginForm {
    pub email: String,
    pub password: String,
}

impl EmployeeLoginForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.email, "email", "Email", &mut errors);
        validate_required(&self.password, "password", "Password", &mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminRegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl AdminRegisterForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.name, "name", "Name", &mut errors);
        validate_required(&self.email, "email", "Email", &mut errors);
        validate_password(&self.password, "password", &mut errors);
        validate_confirmation(&self.password, &self.confirm_password, "confirmPassword", &mut errors);
        errors.into_result()
    }

    fn registration(&self) -> AdminRegistration {
        AdminRegistration {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeRegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub department: String,
    pub employee_id: String,
    pub phone_number: String,
    pub address: String,
}

impl EmployeeRegisterForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.name, "name", "Name", &mut errors);
        validate_required(&self.email, "email", "Email", &mut errors);
        validate_password(&self.password, "password", &mut errors);
        validate_confirmation(&self.password, &self.confirm_password, "confirmPassword", &mut errors);
        validate_required(&self.department, "department", "Department", &mut errors);
        validate_required(&self.employee_id, "employeeId", "Employee ID", &mut errors);
        errors.into_result()
    }

    fn registration(&self) -> EmployeeRegistration {
        EmployeeRegistration {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            department: self.department.trim().to_string(),
            employee_id: self.employee_id.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }
}

/// The public login / registration surface.
pub struct AuthView {
    ctx: PortalContext,
    submit: SubmitGuard,
}

impl AuthView {
    pub fn new(ctx: PortalContext) -> Self {
        Self {
            ctx,
            submit: SubmitGuard::new(),
        }
    }

    pub async fn admin_login(&self, form: &AdminLoginForm) -> Result<Session, ViewError> {
        form.validate().map_err(|e| self.ctx.fail(e.into()))?;
        self.login(Role::Admin, &form.email, &form.password).await
    }

    pub async fn employee_login(&self, form: &EmployeeLoginForm) -> Result<Session, ViewError> {
        form.validate().map_err(|e| self.ctx.fail(e.into()))?;
        self.login(Role::Employee, &form.email, &form.password).await
    }

    /// Register an admin; a returned session opens the dashboard directly.
    pub async fn admin_register(&self, form: &AdminRegisterForm) -> Result<Option<Session>, ViewError> {
        form.validate().map_err(|e| self.ctx.fail(e.into()))?;
        let _ticket = self.begin()?;

        let session = self
            .ctx
            .api
            .auth
            .admin_register(&form.registration())
            .await
            .map_err(|e| self.ctx.fail(e.into()))?;
        self.ctx.notifier.success("Registration successful!");
        self.ctx.navigator.navigate(match session {
            Some(_) => Route::AdminDashboard,
            None => Route::AdminLogin,
        });
        Ok(session)
    }

    /// Register an employee, then send them to the login form.
    pub async fn employee_register(
        &self,
        form: &EmployeeRegisterForm,
    ) -> Result<Option<Session>, ViewError> {
        form.validate().map_err(|e| self.ctx.fail(e.into()))?;
        let _ticket = self.begin()?;

        let session = self
            .ctx
            .api
            .auth
            .employee_register(&form.registration())
            .await
            .map_err(|e| self.ctx.fail(e.into()))?;
        self.ctx.notifier.success("Registration successful! Please login.");
        self.ctx.navigator.navigate(Route::EmployeeLogin);
        Ok(session)
    }

    pub fn logout(&self, role: Role) -> Result<(), ViewError> {
        self.ctx.gate().logout(role).map_err(ViewError::from)
    }

    async fn login(&self, role: Role, email: &str, password: &str) -> Result<Session, ViewError> {
        let _ticket = self.begin()?;
        let auth = &self.ctx.api.auth;
        let result = match role {
            Role::Admin => auth.admin_login(email.trim(), password).await,
            Role::Employee => auth.employee_login(email.trim(), password).await,
        };

        let session = result.map_err(|e| self.ctx.fail(e.into()))?;
        self.ctx.notifier.success(&format!("Welcome, {}", session.profile.name));
        self.ctx.navigator.navigate(Route::home(role));
        Ok(session)
    }

    fn begin(&self) -> Result<crate::gate::SubmitTicket, ViewError> {
        self.submit
            .try_begin()
            .ok_or_else(|| self.ctx.fail(ViewError::Busy))
    }
}
