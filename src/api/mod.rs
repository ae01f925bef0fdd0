//! Typed clients for the backend REST surface.
//!
//! One client per resource group, all sharing an [`HttpGateway`] that
//! attaches bearer tokens from the session store and normalizes failures
//! into [`ApiError`].

pub mod auth;
pub mod employees;
pub mod error;
pub mod gateway;
pub mod offer_letters;
pub mod salary_slips;

pub use auth::{AdminRegistration, AuthClient, EmployeeRegistration};
pub use employees::EmployeeClient;
pub use error::{ApiError, ApiResult};
pub use gateway::{Credential, HttpGateway};
pub use offer_letters::OfferLetterClient;
pub use salary_slips::SalarySlipClient;

/// All resource clients over one gateway.
#[derive(Clone)]
pub struct ApiClients {
    pub auth: AuthClient,
    pub employees: EmployeeClient,
    pub offer_letters: OfferLetterClient,
    pub salary_slips: SalarySlipClient,
}

impl ApiClients {
    pub fn new(gateway: HttpGateway) -> Self {
        Self {
            auth: AuthClient::new(gateway.clone()),
            employees: EmployeeClient::new(gateway.clone()),
            offer_letters: OfferLetterClient::new(gateway.clone()),
            salary_slips: SalarySlipClient::new(gateway),
        }
    }
}
