use super::error::ApiResult;
use super::gateway::{acknowledge, Credential, HttpGateway};
use crate::models::{EmployeeRecord, EmployeeUpdate, Envelope, ListBody, NewEmployee};
use crate::session::Role;

const ADMIN: Credential = Credential::Bearer(Role::Admin);

/// Employee CRUD, admin only.
#[derive(Clone)]
pub struct EmployeeClient {
    gateway: HttpGateway,
}

impl EmployeeClient {
    pub fn new(gateway: HttpGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> ApiResult<Vec<EmployeeRecord>> {
        let body: ListBody<EmployeeRecord> = self
            .gateway
            .get(ADMIN, &["employees"], "Failed to fetch employees")
            .await?;
        let employees = body.into_vec();
        log::debug!("Fetched {} employees", employees.len());
        Ok(employees)
    }

    pub async fn get(&self, id: &str) -> ApiResult<Option<EmployeeRecord>> {
        let value: serde_json::Value = self
            .gateway
            .get(
                ADMIN,
                &["employees", "admin", "employees", id],
                "Failed to fetch employee",
            )
            .await?;

        // Either the record itself or `{ data: record }`.
        let record = match value.get("data") {
            Some(data) => serde_json::from_value::<Option<EmployeeRecord>>(data.clone()),
            None => serde_json::from_value::<Option<EmployeeRecord>>(value),
        }
        .map_err(super::ApiError::Decode)?;
        Ok(record)
    }

    pub async fn create(&self, employee: &NewEmployee) -> ApiResult<Option<String>> {
        let envelope: Option<Envelope<serde_json::Value>> = self
            .gateway
            .post(ADMIN, &["employees"], employee, "Failed to add employee")
            .await?;
        log::info!("Created employee {}", employee.employee_id);
        acknowledge(envelope, "Failed to add employee")
    }

    pub async fn update(&self, id: &str, update: &EmployeeUpdate) -> ApiResult<Option<String>> {
        let envelope: Option<Envelope<serde_json::Value>> = self
            .gateway
            .put(ADMIN, &["employees", id], update, "Failed to update employee")
            .await?;
        log::info!("Updated employee {}", id);
        acknowledge(envelope, "Failed to update employee")
    }

    pub async fn delete(&self, id: &str) -> ApiResult<Option<String>> {
        let envelope: Option<Envelope<serde_json::Value>> = self
            .gateway
            .delete(ADMIN, &["employees", id], "Failed to delete employee")
            .await?;
        log::info!("Deleted employee {}", id);
        acknowledge(envelope, "Failed to delete employee")
    }
}
