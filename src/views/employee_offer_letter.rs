use parking_lot::Mutex;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::{PortalContext, Surface, ViewError};
use crate::export::ExportedDocument;
use crate::gate::{Route, SubmitGuard, ViewSlot};
use crate::models::{OfferLetter, OfferLetterApplication};
use crate::render::{DocumentData, VisualTree};
use crate::session::{Role, Session};
use crate::validation::{validate_date, validate_required, ValidationError, ValidationErrors};

/// The employee's "apply for an offer letter" form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationForm {
    pub full_name: String,
    pub job_title: String,
    pub department: String,
    pub start_date: String,
    pub salary: String,
}

impl ApplicationForm {
    /// Name and department come from the session profile.
    pub fn for_session(session: &Session) -> Self {
        Self {
            full_name: session.profile.name.clone(),
            department: session.profile.department.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.full_name, "fullName", "Full Name", &mut errors);
        validate_required(&self.job_title, "jobTitle", "Job Title", &mut errors);
        validate_required(&self.department, "department", "Department", &mut errors);
        validate_date(&self.start_date, "startDate", "Start Date", &mut errors);
        let salary = self.salary.trim();
        if salary.is_empty() {
            errors.add(ValidationError::empty_field("salary", "Expected Salary"));
        } else if Decimal::from_str(salary).is_err() {
            errors.add(ValidationError::invalid_number("salary", "Expected Salary", salary));
        }
        errors.into_result()
    }

    pub fn to_application(&self, employee_id: &str) -> Result<OfferLetterApplication, ValidationErrors> {
        self.validate()?;
        Ok(OfferLetterApplication {
            full_name: self.full_name.trim().to_string(),
            job_title: self.job_title.trim().to_string(),
            department: self.department.trim().to_string(),
            start_date: self.start_date.trim().to_string(),
            salary: Decimal::from_str(self.salary.trim()).unwrap_or_default(),
            employee_id: employee_id.to_string(),
        })
    }
}

/// The employee's issued offer letter, plus the application form.
pub struct EmployeeOfferLetterView {
    surface: Surface,
    letter: ViewSlot<OfferLetter>,
    form: Mutex<ApplicationForm>,
    submit: SubmitGuard,
}

impl EmployeeOfferLetterView {
    pub fn mount(ctx: PortalContext) -> Result<Self, ViewError> {
        let surface = Surface::mount(ctx, Role::Employee)?;
        let form = ApplicationForm::for_session(surface.session());
        Ok(Self {
            surface,
            letter: ViewSlot::new(),
            form: Mutex::new(form),
            submit: SubmitGuard::new(),
        })
    }

    /// Fetch the issued letter; `None` when nothing has been issued yet.
    pub async fn load(&self) -> Result<Option<OfferLetter>, ViewError> {
        let handle = self.letter.handle();
        let employee_id = self.surface.session().employee_id().to_string();
        let api = &self.surface.ctx().api.offer_letters;

        let letter = self.surface.remote(api.fetch(&employee_id)).await?;
        handle.replace(letter.clone());
        Ok(letter)
    }

    pub fn letter(&self) -> Option<OfferLetter> {
        self.letter.get()
    }

    pub fn preview(&self) -> Option<VisualTree> {
        self.letter()
            .map(|letter| self.surface.ctx().export.renderer().render_offer_letter(&letter))
    }

    pub fn form(&self) -> ApplicationForm {
        self.form.lock().clone()
    }

    pub fn edit(&self, apply: impl FnOnce(&mut ApplicationForm)) {
        apply(&mut self.form.lock());
    }

    pub async fn apply(&self) -> Result<(), ViewError> {
        let _ticket = self.surface.begin(&self.submit)?;
        let application = self
            .form()
            .to_application(self.surface.session().employee_id())
            .map_err(|e| self.surface.invalid(e))?;

        let api = &self.surface.ctx().api.offer_letters;
        self.surface.remote(api.apply(&application)).await?;
        self.surface
            .succeed("Offer letter application submitted successfully!");
        self.surface.navigate(Route::EmployeeHome);
        Ok(())
    }

    pub async fn download(&self) -> Result<ExportedDocument, ViewError> {
        let letter = self.letter().ok_or_else(|| {
            self.surface
                .ctx()
                .fail(ViewError::NotFound("No offer letter has been issued yet".to_string()))
        })?;
        self.surface.download(&DocumentData::OfferLetter(letter)).await
    }
}
