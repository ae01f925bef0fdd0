use std::path::PathBuf;

use crate::document::format::{currency_cents, long_date, today_long};
use crate::models::{OfferLetter, SalarySlip};

/// Page constants, millimetres unless noted.
pub struct PageGeometry;

impl PageGeometry {
    pub const PAGE_WIDTH_MM: f64 = 210.0;
    pub const PAGE_HEIGHT_MM: f64 = 297.0;
    pub const MARGIN_MM: f64 = 10.0;
    pub const CONTENT_WIDTH_MM: f64 = 190.0;
    pub const CONTENT_HEIGHT_MM: f64 = 277.0;
    /// Raster resolution relative to 72 dpi.
    pub const RASTER_SCALE: f64 = 2.0;

    pub fn raster_ppi() -> f64 {
        72.0 * Self::RASTER_SCALE
    }
}

/// A record ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentData {
    OfferLetter(OfferLetter),
    SalarySlip(SalarySlip),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualTree {
    pub header: Header,
    pub title: String,
    pub recipient: Vec<String>,
    pub body: Body,
    pub footer: Footer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub company: String,
    pub logo: Option<PathBuf>,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Paragraphs of composed text; lines within a paragraph are kept.
    Text(Vec<String>),
    Salary(SalaryTable),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRow {
    pub label: String,
    pub amount: String,
}

impl SalaryRow {
    fn new(label: &str, amount: String) -> Self {
        Self {
            label: label.to_string(),
            amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalaryTable {
    /// Label/value pairs identifying the employee.
    pub details: Vec<(String, String)>,
    pub earnings: Vec<SalaryRow>,
    pub deductions: Vec<SalaryRow>,
    pub total_earnings: String,
    pub total_deductions: String,
    pub net_salary: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub closing: String,
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Footer {
    pub signature: Option<Signature>,
    pub note: Option<String>,
}

const SALARY_SLIP_NOTE: &str =
    "This is a computer-generated salary slip and does not require a signature.";

/// Builds page trees for both document kinds.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    company: String,
    logo: Option<PathBuf>,
}

impl DocumentRenderer {
    pub fn new(company: impl Into<String>, logo: Option<PathBuf>) -> Self {
        Self {
            company: company.into(),
            logo,
        }
    }

    pub fn render(&self, document: &DocumentData) -> VisualTree {
        match document {
            DocumentData::OfferLetter(letter) => self.render_offer_letter(letter),
            DocumentData::SalarySlip(slip) => self.render_salary_slip(slip),
        }
    }

    fn header(&self, date: String) -> Header {
        Header {
            company: self.company.clone(),
            logo: self.logo.clone(),
            date,
        }
    }

    pub fn render_offer_letter(&self, letter: &OfferLetter) -> VisualTree {
        let date = letter
            .generated_at
            .map(|ts| long_date(ts.date_naive()))
            .unwrap_or_else(today_long);

        let mut recipient = vec![letter.name.clone()];
        if !letter.email.trim().is_empty() {
            recipient.push(letter.email.clone());
        }

        let mut paragraphs = vec![format!("Dear {},", letter.name)];
        paragraphs.extend(
            letter
                .message
                .replace("\r\n", "\n")
                .split("\n\n")
                .map(|p| p.trim_matches('\n').to_string())
                .filter(|p| !p.trim().is_empty()),
        );

        VisualTree {
            header: self.header(date),
            title: "Offer Letter".to_string(),
            recipient,
            body: Body::Text(paragraphs),
            footer: Footer {
                signature: Some(Signature {
                    closing: "Sincerely,".to_string(),
                    name: letter.hiring_manager.clone(),
                    title: format!("{}, {}", letter.manager_title, self.company),
                }),
                note: None,
            },
        }
    }

    pub fn render_salary_slip(&self, slip: &SalarySlip) -> VisualTree {
        let mut earnings = vec![SalaryRow::new("Basic Salary", currency_cents(slip.basic_salary))];
        if !slip.hra.is_zero() {
            earnings.push(SalaryRow::new("HRA", currency_cents(slip.hra)));
        }
        earnings.push(SalaryRow::new("Allowances", currency_cents(slip.allowances)));

        let table = SalaryTable {
            details: vec![
                ("Employee Name".to_string(), slip.employee_name.clone()),
                ("Employee ID".to_string(), slip.employee_id.clone()),
                ("Designation".to_string(), slip.designation.clone()),
                ("Department".to_string(), slip.department.clone()),
            ],
            earnings,
            deductions: vec![SalaryRow::new("Deductions", currency_cents(slip.deductions))],
            total_earnings: currency_cents(slip.basic_salary + slip.hra + slip.allowances),
            total_deductions: currency_cents(slip.deductions),
            net_salary: currency_cents(slip.net_salary),
        };

        VisualTree {
            header: self.header(today_long()),
            title: "Salary Slip".to_string(),
            recipient: vec![format!("Pay period: {} {}", slip.month, slip.year)],
            body: Body::Salary(table),
            footer: Footer {
                signature: None,
                note: Some(SALARY_SLIP_NOTE.to_string()),
            },
        }
    }
}
