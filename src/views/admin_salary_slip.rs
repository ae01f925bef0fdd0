use chrono::{Datelike, Local};
use parking_lot::Mutex;
use rust_decimal::Decimal;

use super::{PortalContext, Surface, ViewError};
use crate::document::{SalaryField, SalarySlipDraft};
use crate::export::ExportedDocument;
use crate::gate::{Route, SubmitGuard};
use crate::models::EmployeeRecord;
use crate::render::{DocumentData, VisualTree};
use crate::session::Role;

/// Salary-slip editor for one employee.
pub struct AdminSalarySlipView {
    surface: Surface,
    draft: Mutex<SalarySlipDraft>,
    submit: SubmitGuard,
}

impl AdminSalarySlipView {
    pub fn mount(ctx: PortalContext, employee: Option<&EmployeeRecord>) -> Result<Self, ViewError> {
        let surface = Surface::mount(ctx, Role::Admin)?;
        let Some(employee) = employee else {
            surface.ctx().notifier.error("No employee data found");
            surface.navigate(Route::AdminDashboard);
            return Err(ViewError::Redirected(Route::AdminDashboard));
        };

        Ok(Self {
            draft: Mutex::new(SalarySlipDraft::for_employee(employee, Local::now().year())),
            surface,
            submit: SubmitGuard::new(),
        })
    }

    pub fn draft(&self) -> SalarySlipDraft {
        self.draft.lock().clone()
    }

    /// Edit one input; the net salary follows immediately.
    pub fn set(&self, field: SalaryField, value: impl Into<String>) -> Decimal {
        let mut draft = self.draft.lock();
        draft.set(field, value);
        draft.net_salary()
    }

    pub fn net_salary(&self) -> Decimal {
        self.draft.lock().net_salary()
    }

    /// Rendered slip, once the draft is complete.
    pub fn preview(&self) -> Result<VisualTree, ViewError> {
        let slip = self.draft().to_slip().map_err(ViewError::Validation)?;
        Ok(self.surface.ctx().export.renderer().render_salary_slip(&slip))
    }

    pub async fn submit(&self) -> Result<(), ViewError> {
        let _ticket = self.surface.begin(&self.submit)?;
        let slip = self.draft().to_slip().map_err(|e| self.surface.invalid(e))?;

        let api = &self.surface.ctx().api.salary_slips;
        self.surface.remote(api.create(&slip)).await?;
        self.surface.succeed("Salary slip saved successfully");
        self.surface.navigate(Route::AdminDashboard);
        Ok(())
    }

    pub async fn download(&self) -> Result<ExportedDocument, ViewError> {
        let slip = self.draft().to_slip().map_err(|e| self.surface.invalid(e))?;
        self.surface.download(&DocumentData::SalarySlip(slip)).await
    }
}
