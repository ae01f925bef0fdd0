use chrono::Utc;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::format::{currency_whole, iso_timestamp, long_date, parse_date};
use super::template::{compose, Token, TokenValues};
use crate::models::{EmployeeRecord, OfferLetter, OfferLetterSubmission};
use crate::validation::{validate_date, validate_required, ValidationError, ValidationErrors};

pub const DEFAULT_OFFER_MESSAGE: &str = "We are pleased to extend an offer of employment for the position of [Position] at PizeonFly.

Based on your qualifications and experience, we would like to offer you this position with the following details:

Position: [Position]
Employee ID: [EmployeeId]
Start Date: [Start Date]
Annual Salary: [Salary]

This offer is contingent upon the successful completion of our pre-employment process.

We are excited about the prospect of having you join our team and believe you will be a valuable asset to our organization.

Please indicate your acceptance of this offer by signing below.";

/// The admin's offer-letter form, held client-side until submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferLetterDraft {
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub position: String,
    /// `YYYY-MM-DD` as typed.
    pub start_date: String,
    /// Annual salary as typed.
    pub salary: String,
    pub hiring_manager: String,
    pub manager_title: String,
    pub message_template: String,
}

impl Default for OfferLetterDraft {
    fn default() -> Self {
        Self {
            employee_id: String::new(),
            name: String::new(),
            email: String::new(),
            position: String::new(),
            start_date: String::new(),
            salary: String::new(),
            hiring_manager: String::new(),
            manager_title: String::new(),
            message_template: DEFAULT_OFFER_MESSAGE.to_string(),
        }
    }
}

impl OfferLetterDraft {
    /// Prefill from the selected employee; the position defaults to the
    /// employee's department.
    pub fn for_employee(employee: &EmployeeRecord) -> Self {
        Self {
            employee_id: employee.employee_id.clone(),
            name: employee.name.clone(),
            email: employee.email.clone(),
            position: employee.department.clone(),
            start_date: employee
                .start_date
                .as_deref()
                .and_then(parse_date)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            salary: employee
                .expected_salary
                .map(|s| s.normalize().to_string())
                .unwrap_or_default(),
            ..Self::default()
        }
    }

    fn salary_amount(&self) -> Option<Decimal> {
        Decimal::from_str(self.salary.trim()).ok()
    }

    /// Token values available so far; blanks stay as placeholders.
    pub fn token_values(&self) -> TokenValues {
        let non_empty = |s: &str| Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_string);

        let mut values = TokenValues::new();
        values.set(Token::Position, non_empty(&self.position));
        values.set(Token::EmployeeId, non_empty(&self.employee_id));
        values.set(Token::StartDate, parse_date(&self.start_date).map(long_date));
        values.set(Token::Salary, self.salary_amount().map(currency_whole));
        values
    }

    /// Message with every available token substituted.
    pub fn compose_message(&self) -> String {
        compose(&self.message_template, &self.token_values())
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.hiring_manager, "hiringManager", "Hiring Manager", &mut errors);
        validate_required(&self.manager_title, "managerTitle", "Manager Title", &mut errors);
        validate_date(&self.start_date, "startDate", "Start Date", &mut errors);
        validate_required(&self.salary, "salary", "Salary", &mut errors);
        if !self.salary.trim().is_empty() && self.salary_amount().is_none() {
            errors.add(ValidationError::invalid_number("salary", "Salary", self.salary.trim()));
        }
        errors.into_result()
    }

    pub fn to_submission(&self) -> Result<OfferLetterSubmission, ValidationErrors> {
        self.validate()?;
        let start = parse_date(&self.start_date).map(iso_timestamp).unwrap_or_default();

        Ok(OfferLetterSubmission {
            employee_id: self.employee_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            position: self.position.clone(),
            start_date: start,
            salary: self.salary_amount().unwrap_or_default(),
            hiring_manager: self.hiring_manager.clone(),
            manager_title: self.manager_title.clone(),
            message: self.compose_message(),
        })
    }

    /// Letter as it would look once issued now, for preview and download.
    pub fn preview(&self) -> OfferLetter {
        OfferLetter {
            id: None,
            employee_id: self.employee_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            position: self.position.clone(),
            start_date: Some(self.start_date.clone()).filter(|s| !s.trim().is_empty()),
            salary: self.salary_amount().unwrap_or_default(),
            hiring_manager: self.hiring_manager.clone(),
            manager_title: self.manager_title.clone(),
            message: self.compose_message(),
            status: None,
            generated_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> OfferLetterDraft {
        OfferLetterDraft {
            employee_id: "EMP001".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            position: "Engineer".to_string(),
            start_date: "2025-01-05".to_string(),
            salary: "600000".to_string(),
            hiring_manager: "John Smith".to_string(),
            manager_title: "CTO".to_string(),
            ..OfferLetterDraft::default()
        }
    }

    #[test]
    fn test_default_template_composes_fully() {
        let message = draft().compose_message();
        assert!(message.starts_with(
            "We are pleased to extend an offer of employment for the position of Engineer at PizeonFly."
        ));
        assert!(message.contains("Position: Engineer\n"));
        assert!(message.contains("Employee ID: EMP001\n"));
        assert!(message.contains("Start Date: January 5, 2025\n"));
        assert!(message.contains("Annual Salary: ₹600,000\n"));
        assert!(!message.contains('['));
    }

    #[test]
    fn test_preview_keeps_missing_tokens() {
        let mut d = draft();
        d.start_date.clear();
        d.salary = "lots".to_string();
        let message = d.compose_message();
        assert!(message.contains("Start Date: [Start Date]"));
        assert!(message.contains("Annual Salary: [Salary]"));
    }

    #[test]
    fn test_submission_fields() {
        let submission = draft().to_submission().unwrap();
        assert_eq!(submission.start_date, "2025-01-05T00:00:00.000Z");
        assert_eq!(submission.salary, Decimal::from(600000));
        assert!(submission.message.contains("₹600,000"));
    }

    #[test]
    fn test_submission_requires_manager_fields() {
        let mut d = draft();
        d.hiring_manager.clear();
        d.manager_title = " ".to_string();
        d.salary = "abc".to_string();
        let errors = d.to_submission().unwrap_err();
        assert!(errors.has_field("hiringManager"));
        assert!(errors.has_field("managerTitle"));
        assert!(errors.has_field("salary"));
        assert!(!errors.has_field("startDate"));
    }

    #[test]
    fn test_for_employee_prefill() {
        let employee = EmployeeRecord {
            id: "65f0".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            department: "Engineering".to_string(),
            employee_id: "EMP001".to_string(),
            start_date: Some("2025-02-01T00:00:00.000Z".to_string()),
            expected_salary: Some(Decimal::from_str("750000.0").unwrap()),
            designation: None,
        };

        let d = OfferLetterDraft::for_employee(&employee);
        assert_eq!(d.position, "Engineering");
        assert_eq!(d.start_date, "2025-02-01");
        assert_eq!(d.salary, "750000");
        assert_eq!(d.message_template, DEFAULT_OFFER_MESSAGE);
    }
}
