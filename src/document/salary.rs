use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use std::str::FromStr;

use super::format::normalize_month;
use crate::models::{EmployeeRecord, SalarySlip, SalarySlipRequest};
use crate::validation::{
    validate_month, validate_required, validate_year, ValidationErrors,
};

/// Parse a form amount. Empty or non-numeric input counts as zero.
pub fn parse_amount(input: &str) -> Decimal {
    Decimal::from_str(input.trim()).unwrap_or(Decimal::ZERO)
}

/// `basic + hra + allowances - deductions`.
pub fn net_salary(
    basic: Decimal,
    hra: Decimal,
    allowances: Decimal,
    deductions: Decimal,
) -> Decimal {
    basic + hra + allowances - deductions
}

/// Editable inputs of the admin salary-slip form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryField {
    EmployeeName,
    EmployeeId,
    Designation,
    Department,
    Month,
    Year,
    BasicSalary,
    Hra,
    Allowances,
    Deductions,
}

/// The admin's salary-slip form.
///
/// Inputs are held as typed text; the net salary is derived and recomputed
/// on every edit, never set directly.
#[derive(Debug, Clone, PartialEq)]
pub struct SalarySlipDraft {
    employee_name: String,
    employee_id: String,
    designation: String,
    department: String,
    month: String,
    year: String,
    basic_salary: String,
    hra: String,
    allowances: String,
    deductions: String,
    net_salary: Decimal,
}

impl Default for SalarySlipDraft {
    fn default() -> Self {
        Self::new(Local::now().year())
    }
}

impl SalarySlipDraft {
    pub fn new(year: i32) -> Self {
        Self {
            employee_name: String::new(),
            employee_id: String::new(),
            designation: String::new(),
            department: String::new(),
            month: String::new(),
            year: year.to_string(),
            basic_salary: String::new(),
            hra: String::new(),
            allowances: String::new(),
            deductions: String::new(),
            net_salary: Decimal::ZERO,
        }
    }

    /// Prefill identity fields from the selected employee.
    pub fn for_employee(employee: &EmployeeRecord, year: i32) -> Self {
        let mut draft = Self::new(year);
        draft.employee_name = employee.name.clone();
        draft.employee_id = employee.employee_id.clone();
        draft.designation = employee.designation.clone().unwrap_or_default();
        draft.department = employee.department.clone();
        draft
    }

    pub fn set(&mut self, field: SalaryField, value: impl Into<String>) {
        let value = value.into();
        match field {
            SalaryField::EmployeeName => self.employee_name = value,
            SalaryField::EmployeeId => self.employee_id = value,
            SalaryField::Designation => self.designation = value,
            SalaryField::Department => self.department = value,
            SalaryField::Month => self.month = value,
            SalaryField::Year => self.year = value,
            SalaryField::BasicSalary => self.basic_salary = value,
            SalaryField::Hra => self.hra = value,
            SalaryField::Allowances => self.allowances = value,
            SalaryField::Deductions => self.deductions = value,
        }
        self.recompute();
    }

    pub fn get(&self, field: SalaryField) -> &str {
        match field {
            SalaryField::EmployeeName => &self.employee_name,
            SalaryField::EmployeeId => &self.employee_id,
            SalaryField::Designation => &self.designation,
            SalaryField::Department => &self.department,
            SalaryField::Month => &self.month,
            SalaryField::Year => &self.year,
            SalaryField::BasicSalary => &self.basic_salary,
            SalaryField::Hra => &self.hra,
            SalaryField::Allowances => &self.allowances,
            SalaryField::Deductions => &self.deductions,
        }
    }

    pub fn net_salary(&self) -> Decimal {
        self.net_salary
    }

    fn recompute(&mut self) {
        self.net_salary = net_salary(
            parse_amount(&self.basic_salary),
            parse_amount(&self.hra),
            parse_amount(&self.allowances),
            parse_amount(&self.deductions),
        );
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.employee_id, "employeeId", "Employee ID", &mut errors);
        validate_required(&self.employee_name, "employeeName", "Employee Name", &mut errors);
        validate_required(&self.designation, "designation", "Designation", &mut errors);
        validate_required(&self.department, "department", "Department", &mut errors);
        validate_month(&self.month, "month", &mut errors);
        validate_year(&self.year, "year", &mut errors);
        validate_required(&self.basic_salary, "basicSalary", "Basic Salary", &mut errors);
        errors.into_result()
    }

    /// The record to submit and render.
    pub fn to_slip(&self) -> Result<SalarySlip, ValidationErrors> {
        self.validate()?;
        Ok(SalarySlip {
            id: None,
            employee_name: self.employee_name.trim().to_string(),
            employee_id: self.employee_id.trim().to_string(),
            designation: self.designation.trim().to_string(),
            department: self.department.trim().to_string(),
            month: normalize_month(&self.month).unwrap_or_default().to_string(),
            year: self.year.trim().parse().unwrap_or_default(),
            basic_salary: parse_amount(&self.basic_salary),
            hra: parse_amount(&self.hra),
            allowances: parse_amount(&self.allowances),
            deductions: parse_amount(&self.deductions),
            net_salary: self.net_salary,
        })
    }
}

/// The employee's salary-slip request form. Has no HRA input.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeSalaryDraft {
    pub full_name: String,
    pub department: String,
    pub month: String,
    pub year: String,
    pub basic_salary: String,
    pub allowances: String,
    pub deductions: String,
}

impl EmployeeSalaryDraft {
    pub fn net_salary(&self) -> Decimal {
        net_salary(
            parse_amount(&self.basic_salary),
            Decimal::ZERO,
            parse_amount(&self.allowances),
            parse_amount(&self.deductions),
        )
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.full_name, "employeeName", "Full Name", &mut errors);
        validate_required(&self.department, "department", "Department", &mut errors);
        validate_month(&self.month, "month", &mut errors);
        validate_year(&self.year, "year", &mut errors);
        validate_required(&self.basic_salary, "basicSalary", "Basic Salary", &mut errors);
        errors.into_result()
    }

    pub fn to_request(&self, employee_id: &str) -> Result<SalarySlipRequest, ValidationErrors> {
        self.validate()?;
        Ok(SalarySlipRequest {
            employee_name: self.full_name.trim().to_string(),
            employee_id: employee_id.to_string(),
            department: self.department.trim().to_string(),
            month: normalize_month(&self.month).unwrap_or_default().to_string(),
            year: self.year.trim().parse().unwrap_or_default(),
            basic_salary: parse_amount(&self.basic_salary),
            allowances: parse_amount(&self.allowances),
            deductions: parse_amount(&self.deductions),
            net_salary: self.net_salary(),
        })
    }
}
