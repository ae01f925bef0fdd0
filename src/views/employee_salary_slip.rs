use chrono::{Datelike, Local};
use parking_lot::Mutex;
use rust_decimal::Decimal;

use super::{PortalContext, Surface, ViewError};
use crate::document::EmployeeSalaryDraft;
use crate::export::ExportedDocument;
use crate::gate::{Route, SubmitGuard, ViewSlot};
use crate::models::SalarySlip;
use crate::render::{DocumentData, VisualTree};
use crate::session::Role;

/// The employee's current salary slip, plus the request form.
pub struct EmployeeSalarySlipView {
    surface: Surface,
    current: ViewSlot<SalarySlip>,
    form: Mutex<EmployeeSalaryDraft>,
    submit: SubmitGuard,
}

impl EmployeeSalarySlipView {
    pub fn mount(ctx: PortalContext) -> Result<Self, ViewError> {
        let surface = Surface::mount(ctx, Role::Employee)?;
        let profile = &surface.session().profile;
        let form = EmployeeSalaryDraft {
            full_name: profile.name.clone(),
            department: profile.department.clone().unwrap_or_default(),
            month: String::new(),
            year: Local::now().year().to_string(),
            basic_salary: String::new(),
            allowances: String::new(),
            deductions: String::new(),
        };

        Ok(Self {
            surface,
            current: ViewSlot::new(),
            form: Mutex::new(form),
            submit: SubmitGuard::new(),
        })
    }

    /// Fetch the slips and keep the most recent one. An empty answer clears
    /// any slip shown before.
    pub async fn load(&self) -> Result<Option<SalarySlip>, ViewError> {
        let handle = self.current.handle();
        let employee_id = self.surface.session().employee_id().to_string();
        let api = &self.surface.ctx().api.salary_slips;

        let slip = self.surface.remote(api.current(&employee_id)).await?;
        handle.replace(slip.clone());
        Ok(slip)
    }

    pub fn current(&self) -> Option<SalarySlip> {
        self.current.get()
    }

    pub fn preview(&self) -> Option<VisualTree> {
        self.current()
            .map(|slip| self.surface.ctx().export.renderer().render_salary_slip(&slip))
    }

    pub fn form(&self) -> EmployeeSalaryDraft {
        self.form.lock().clone()
    }

    /// Edit the request form and return the recomputed net salary.
    pub fn edit(&self, apply: impl FnOnce(&mut EmployeeSalaryDraft)) -> Decimal {
        let mut form = self.form.lock();
        apply(&mut form);
        form.net_salary()
    }

    pub async fn request(&self) -> Result<(), ViewError> {
        let _ticket = self.surface.begin(&self.submit)?;
        let request = self
            .form()
            .to_request(self.surface.session().employee_id())
            .map_err(|e| self.surface.invalid(e))?;

        let api = &self.surface.ctx().api.salary_slips;
        self.surface.remote(api.request(&request)).await?;
        self.surface
            .succeed("Salary slip request submitted successfully!");
        self.surface.navigate(Route::EmployeeHome);
        Ok(())
    }

    pub async fn download(&self) -> Result<ExportedDocument, ViewError> {
        let slip = self.current().ok_or_else(|| {
            self.surface
                .ctx()
                .fail(ViewError::NotFound("No salary slip available yet".to_string()))
        })?;
        self.surface.download(&DocumentData::SalarySlip(slip)).await
    }
}
