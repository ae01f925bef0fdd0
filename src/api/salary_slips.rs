use super::error::{ApiError, ApiResult};
use super::gateway::{acknowledge, Credential, HttpGateway};
use crate::models::{Envelope, ListBody, SalarySlip, SalarySlipRequest};
use crate::session::Role;

#[derive(Clone)]
pub struct SalarySlipClient {
    gateway: HttpGateway,
}

impl SalarySlipClient {
    pub fn new(gateway: HttpGateway) -> Self {
        Self { gateway }
    }

    /// Save a salary slip (admin).
    pub async fn create(&self, slip: &SalarySlip) -> ApiResult<Option<String>> {
        let envelope: Option<Envelope<serde_json::Value>> = self
            .gateway
            .post(
                Credential::Bearer(Role::Admin),
                &["salary-slips"],
                slip,
                "Error saving salary slip",
            )
            .await?;
        let message = acknowledge(envelope, "Failed to save salary slip")?;
        log::info!(
            "Salary slip saved for {} ({} {})",
            slip.employee_id,
            slip.month,
            slip.year
        );
        Ok(message)
    }

    /// All slips for an employee, most recent first.
    pub async fn list_for_employee(&self, employee_id: &str) -> ApiResult<Vec<SalarySlip>> {
        let result: ApiResult<ListBody<SalarySlip>> = self
            .gateway
            .get(
                Credential::Bearer(Role::Employee),
                &["salary-slips", "employee", employee_id],
                "Failed to fetch salary slip",
            )
            .await;

        match result {
            Ok(body) => Ok(body.into_vec()),
            Err(ApiError::Server { status: 404, .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// The current (most recent) slip.
    pub async fn current(&self, employee_id: &str) -> ApiResult<Option<SalarySlip>> {
        Ok(self.list_for_employee(employee_id).await?.into_iter().next())
    }

    /// Ask for a salary slip (employee).
    pub async fn request(&self, request: &SalarySlipRequest) -> ApiResult<Option<String>> {
        let envelope: Option<Envelope<serde_json::Value>> = self
            .gateway
            .post(
                Credential::Bearer(Role::Employee),
                &["employees", "salary-slip"],
                request,
                "Failed to submit salary slip request",
            )
            .await?;
        acknowledge(envelope, "Failed to submit salary slip request")
    }
}
