//! Document composer - turns records and drafts into display text.
//!
//! - `template` - placeholder substitution over an explicit token table
//! - `format` - long-form dates and grouped currency
//! - `offer_letter` - the admin's offer-letter draft
//! - `salary` - salary-slip drafts and the net-salary computation
//!
//! Nothing in here performs I/O.

pub mod format;
pub mod offer_letter;
pub mod salary;
pub mod template;

pub use offer_letter::{OfferLetterDraft, DEFAULT_OFFER_MESSAGE};
pub use salary::{net_salary, parse_amount, EmployeeSalaryDraft, SalaryField, SalarySlipDraft};
pub use template::{compose, Token, TokenValues};
