use parking_lot::Mutex;

use super::{PortalContext, Surface, ViewError};
use crate::document::OfferLetterDraft;
use crate::export::ExportedDocument;
use crate::gate::{Route, SubmitGuard};
use crate::models::EmployeeRecord;
use crate::render::{DocumentData, VisualTree};
use crate::session::Role;

/// Offer-letter editor for one employee, with live preview.
pub struct AdminOfferLetterView {
    surface: Surface,
    draft: Mutex<OfferLetterDraft>,
    submit: SubmitGuard,
}

impl AdminOfferLetterView {
    /// Open the editor prefilled from `employee`. Without an employee the
    /// admin is sent back to the dashboard.
    pub fn mount(ctx: PortalContext, employee: Option<&EmployeeRecord>) -> Result<Self, ViewError> {
        let surface = Surface::mount(ctx, Role::Admin)?;
        let Some(employee) = employee else {
            surface.ctx().notifier.error("No employee data provided");
            surface.navigate(Route::AdminDashboard);
            return Err(ViewError::Redirected(Route::AdminDashboard));
        };

        Ok(Self {
            draft: Mutex::new(OfferLetterDraft::for_employee(employee)),
            surface,
            submit: SubmitGuard::new(),
        })
    }

    pub fn draft(&self) -> OfferLetterDraft {
        self.draft.lock().clone()
    }

    pub fn edit(&self, apply: impl FnOnce(&mut OfferLetterDraft)) {
        apply(&mut self.draft.lock());
    }

    /// The message as it reads right now; missing values keep their
    /// placeholders.
    pub fn preview_message(&self) -> String {
        self.draft.lock().compose_message()
    }

    pub fn preview(&self) -> VisualTree {
        let letter = self.draft.lock().preview();
        self.surface.ctx().export.renderer().render_offer_letter(&letter)
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_busy()
    }

    /// Validate and issue the letter. The draft is kept on failure.
    pub async fn submit(&self) -> Result<(), ViewError> {
        let _ticket = self.surface.begin(&self.submit)?;
        let submission = self
            .draft()
            .to_submission()
            .map_err(|e| self.surface.invalid(e))?;

        let api = &self.surface.ctx().api.offer_letters;
        let message = self.surface.remote(api.create(&submission)).await?;
        self.surface
            .succeed(message.as_deref().unwrap_or("Offer letter submitted successfully"));
        self.surface.navigate(Route::AdminDashboard);
        Ok(())
    }

    pub async fn download(&self) -> Result<ExportedDocument, ViewError> {
        let letter = self.draft.lock().preview();
        self.surface
            .download(&DocumentData::OfferLetter(letter))
            .await
    }

    pub async fn update_status(&self, status: &str) -> Result<(), ViewError> {
        let employee_id = self.draft.lock().employee_id.clone();
        let api = &self.surface.ctx().api.offer_letters;
        let message = self
            .surface
            .remote(api.update_status(&employee_id, status))
            .await?;
        self.surface.succeed(
            message
                .as_deref()
                .unwrap_or("Offer letter status updated successfully"),
        );
        Ok(())
    }
}
