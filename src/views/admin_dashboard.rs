use super::{PortalContext, Surface, ViewError};
use crate::document::parse_amount;
use crate::gate::{SubmitGuard, ViewSlot};
use crate::models::{EmployeeRecord, EmployeeUpdate, NewEmployee};
use crate::session::Role;
use crate::validation::{validate_date, validate_required, ValidationErrors};

/// The "add employee" form as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeForm {
    pub name: String,
    pub email: String,
    pub department: String,
    pub employee_id: String,
    pub start_date: String,
    pub expected_salary: String,
}

impl EmployeeForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.name, "name", "Name", &mut errors);
        validate_required(&self.email, "email", "Email", &mut errors);
        validate_required(&self.department, "department", "Department", &mut errors);
        validate_required(&self.employee_id, "employeeId", "Employee ID", &mut errors);
        validate_date(&self.start_date, "startDate", "Start Date", &mut errors);
        errors.into_result()
    }

    pub fn to_new_employee(&self) -> Result<NewEmployee, ValidationErrors> {
        self.validate()?;
        Ok(NewEmployee {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            department: self.department.trim().to_string(),
            employee_id: self.employee_id.trim().to_string(),
            start_date: self.start_date.trim().to_string(),
            expected_salary: parse_amount(&self.expected_salary),
        })
    }
}

/// Admin landing view: the employee list and its mutations.
pub struct AdminDashboard {
    surface: Surface,
    employees: ViewSlot<Vec<EmployeeRecord>>,
    submit: SubmitGuard,
}

impl AdminDashboard {
    pub fn mount(ctx: PortalContext) -> Result<Self, ViewError> {
        Ok(Self {
            surface: Surface::mount(ctx, Role::Admin)?,
            employees: ViewSlot::new(),
            submit: SubmitGuard::new(),
        })
    }

    pub fn employees(&self) -> Vec<EmployeeRecord> {
        self.employees.get().unwrap_or_default()
    }

    pub fn find(&self, key: &str) -> Option<EmployeeRecord> {
        self.employees()
            .into_iter()
            .find(|e| e.id == key || e.employee_id == key)
    }

    /// Fetch the list; the newest response replaces whatever is shown.
    pub async fn refresh(&self) -> Result<Vec<EmployeeRecord>, ViewError> {
        let handle = self.employees.handle();
        let api = &self.surface.ctx().api.employees;
        let employees = self.surface.remote(api.list()).await?;
        log::info!("Fetched {} employees", employees.len());
        handle.set(employees.clone());
        Ok(employees)
    }

    /// Look up one record by backend id.
    pub async fn employee(&self, id: &str) -> Result<EmployeeRecord, ViewError> {
        let api = &self.surface.ctx().api.employees;
        self.surface
            .remote(api.get(id))
            .await?
            .ok_or_else(|| {
                self.surface
                    .ctx()
                    .fail(ViewError::NotFound(format!("Employee {} not found", id)))
            })
    }

    pub async fn add_employee(&self, form: &EmployeeForm) -> Result<(), ViewError> {
        let employee = form
            .to_new_employee()
            .map_err(|e| self.surface.invalid(e))?;
        let _ticket = self.surface.begin(&self.submit)?;

        let api = &self.surface.ctx().api.employees;
        self.surface.remote(api.create(&employee)).await?;
        self.surface.succeed("Employee added successfully");
        self.refresh().await.map(|_| ())
    }

    pub async fn update_employee(&self, id: &str, update: &EmployeeUpdate) -> Result<(), ViewError> {
        let _ticket = self.surface.begin(&self.submit)?;

        let api = &self.surface.ctx().api.employees;
        let message = self.surface.remote(api.update(id, update)).await?;
        self.surface
            .succeed(message.as_deref().unwrap_or("Employee updated successfully"));
        self.refresh().await.map(|_| ())
    }

    /// Delete after explicit confirmation. Returns whether anything was
    /// deleted; an unconfirmed call makes no request.
    pub async fn delete_employee(&self, id: &str, confirmed: bool) -> Result<bool, ViewError> {
        if !confirmed {
            self.surface.ctx().notifier.info("Deletion cancelled");
            return Ok(false);
        }
        let _ticket = self.surface.begin(&self.submit)?;

        let api = &self.surface.ctx().api.employees;
        self.surface.remote(api.delete(id)).await?;
        self.surface.succeed("Employee deleted successfully");
        self.refresh().await?;
        Ok(true)
    }

    pub fn logout(self) -> Result<(), ViewError> {
        self.surface.logout()
    }
}
