use serde::Serialize;

use super::error::{ApiError, ApiResult};
use super::gateway::{acknowledge, Credential, HttpGateway};
use crate::models::{Envelope, OfferLetter, OfferLetterApplication, OfferLetterSubmission};
use crate::session::Role;

#[derive(Serialize)]
struct StatusUpdate<'a> {
    status: &'a str,
}

#[derive(Clone)]
pub struct OfferLetterClient {
    gateway: HttpGateway,
}

impl OfferLetterClient {
    pub fn new(gateway: HttpGateway) -> Self {
        Self { gateway }
    }

    /// Issue an offer letter (admin).
    pub async fn create(&self, submission: &OfferLetterSubmission) -> ApiResult<Option<String>> {
        let envelope: Option<Envelope<serde_json::Value>> = self
            .gateway
            .post(
                Credential::Bearer(Role::Admin),
                &["offer-letter", "create"],
                submission,
                "Failed to submit offer letter",
            )
            .await?;
        log::info!("Offer letter issued for {}", submission.employee_id);
        acknowledge(envelope, "Failed to submit offer letter")
    }

    /// The employee's offer letter, `None` when none has been issued yet.
    pub async fn fetch(&self, employee_id: &str) -> ApiResult<Option<OfferLetter>> {
        let result: ApiResult<Option<Envelope<OfferLetter>>> = self
            .gateway
            .get(
                Credential::Bearer(Role::Employee),
                &["offer-letter", employee_id],
                "Failed to fetch offer letter",
            )
            .await;

        match result {
            Ok(envelope) => Ok(envelope.and_then(|e| e.data)),
            Err(ApiError::Server { status: 404, .. }) => {
                log::debug!("No offer letter for {}", employee_id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Ask for an offer letter (employee).
    pub async fn apply(&self, application: &OfferLetterApplication) -> ApiResult<Option<String>> {
        let envelope: Option<Envelope<serde_json::Value>> = self
            .gateway
            .post(
                Credential::Bearer(Role::Employee),
                &["employees", "apply-offer-letter"],
                application,
                "Failed to submit offer letter",
            )
            .await?;
        acknowledge(envelope, "Failed to submit offer letter")
    }

    pub async fn update_status(&self, employee_id: &str, status: &str) -> ApiResult<Option<String>> {
        let envelope: Option<Envelope<serde_json::Value>> = self
            .gateway
            .put(
                Credential::Bearer(Role::Admin),
                &["employees", "admin", "offer-letter", employee_id, "status"],
                &StatusUpdate { status },
                "Failed to update offer letter status",
            )
            .await?;
        log::info!("Offer letter status for {} set to {}", employee_id, status);
        acknowledge(envelope, "Failed to update offer letter status")
    }
}
