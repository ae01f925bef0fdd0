use sanitize_filename::sanitize;

use crate::models::{OfferLetter, SalarySlip};
use crate::render::DocumentData;

pub fn offer_letter_filename(letter: &OfferLetter) -> String {
    sanitize(format!("Offer_Letter_{}.pdf", letter.name))
}

pub fn salary_slip_filename(slip: &SalarySlip) -> String {
    sanitize(format!(
        "Salary_Slip_{}_{}_{}.pdf",
        slip.employee_name, slip.month, slip.year
    ))
}

pub fn filename_for(document: &DocumentData) -> String {
    match document {
        DocumentData::OfferLetter(letter) => offer_letter_filename(letter),
        DocumentData::SalarySlip(slip) => salary_slip_filename(slip),
    }
}
