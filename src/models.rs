//! Records exchanged with the backend.
//!
//! Field names follow the backend's camelCase JSON. Money is carried as
//! `Decimal` and serialized as a JSON number.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Employee record as listed on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(alias = "fullName", default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub expected_salary: Option<Decimal>,
    #[serde(alias = "jobTitle", default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub department: String,
    pub employee_id: String,
    pub start_date: String,
    pub expected_salary: Decimal,
}

/// Partial update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_salary: Option<Decimal>,
}

/// Body of `POST /offer-letter/create`. `message` is already composed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferLetterSubmission {
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub position: String,
    /// ISO-8601 timestamp.
    pub start_date: String,
    pub salary: Decimal,
    pub hiring_manager: String,
    pub manager_title: String,
    pub message: String,
}

/// A persisted offer letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferLetter {
    #[serde(alias = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub salary: Decimal,
    #[serde(default)]
    pub hiring_manager: String,
    #[serde(default)]
    pub manager_title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(alias = "createdAt", default)]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /employees/apply-offer-letter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferLetterApplication {
    pub full_name: String,
    pub job_title: String,
    pub department: String,
    pub start_date: String,
    pub salary: Decimal,
    pub employee_id: String,
}

/// A salary slip, both as submitted by an admin and as listed for an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalarySlip {
    #[serde(alias = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub month: String,
    #[serde(deserialize_with = "year_from_number_or_string")]
    pub year: i32,
    #[serde(default)]
    pub basic_salary: Decimal,
    #[serde(default)]
    pub hra: Decimal,
    #[serde(default)]
    pub allowances: Decimal,
    #[serde(default)]
    pub deductions: Decimal,
    #[serde(default)]
    pub net_salary: Decimal,
}

/// Body of `POST /employees/salary-slip`. Employees cannot set HRA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalarySlipRequest {
    pub employee_name: String,
    pub employee_id: String,
    pub department: String,
    pub month: String,
    pub year: i32,
    pub basic_salary: Decimal,
    pub allowances: Decimal,
    pub deductions: Decimal,
    pub net_salary: Decimal,
}

/// `{ success?, message?, data? }` wrapper used by most endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

/// List endpoints answer either with a bare array or a wrapped one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    Plain(Vec<T>),
    Wrapped(Envelope<Vec<T>>),
}

impl<T> ListBody<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Plain(items) => items,
            ListBody::Wrapped(envelope) => envelope.data.unwrap_or_default(),
        }
    }
}

fn year_from_number_or_string<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .and_then(|y| i32::try_from(y).ok())
            .ok_or_else(|| D::Error::custom(format!("invalid year {n}"))),
        Value::String(s) => s
            .trim()
            .parse::<i32>()
            .map_err(|_| D::Error::custom(format!("invalid year {s:?}"))),
        other => Err(D::Error::custom(format!("invalid year {other}"))),
    }
}
