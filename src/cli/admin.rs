use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

use super::output::{print_employees, print_tree};
use crate::document::SalaryField;
use crate::models::{EmployeeRecord, EmployeeUpdate};
use crate::session::Role;
use crate::validation::{ValidationError, ValidationErrors};
use crate::views::admin_dashboard::EmployeeForm;
use crate::views::{
    AdminDashboard, AdminLoginForm, AdminOfferLetterView, AdminRegisterForm, AdminSalarySlipView,
    AuthView, PortalContext, ViewError,
};

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Log in as administrator
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Register a new administrator
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Drop the administrator session
    Logout,

    /// Manage employee records
    #[command(subcommand)]
    Employees(EmployeesCommand),

    /// Issue offer letters
    #[command(subcommand)]
    OfferLetter(OfferLetterCommand),

    /// Issue salary slips
    #[command(subcommand)]
    SalarySlip(SalarySlipCommand),
}

#[derive(Subcommand, Debug)]
pub enum EmployeesCommand {
    /// List all employees
    #[command(alias = "ls")]
    List,

    /// Add an employee
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        employee_id: String,
        /// YYYY-MM-DD
        #[arg(long)]
        start_date: String,
        #[arg(long, default_value = "")]
        expected_salary: String,
    },

    /// Update fields of an employee
    Update {
        /// Backend id of the employee
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        expected_salary: Option<String>,
    },

    /// Delete an employee
    Delete {
        /// Backend id of the employee
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Offer-letter fields; blanks keep the values prefilled from the employee.
#[derive(Args, Debug, Clone)]
pub struct LetterArgs {
    /// Backend id or employee id
    pub employee: String,
    #[arg(long)]
    pub position: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub start_date: Option<String>,
    /// Annual salary
    #[arg(long)]
    pub salary: Option<String>,
    #[arg(long, default_value = "")]
    pub hiring_manager: String,
    #[arg(long, default_value = "")]
    pub manager_title: String,
    /// File holding the message template
    #[arg(long)]
    pub message_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum OfferLetterCommand {
    /// Submit an offer letter
    Create(LetterArgs),
    /// Print the composed letter
    Preview(LetterArgs),
    /// Save the letter as PDF
    Download(LetterArgs),
    /// Set the status of an employee's offer letter
    Status {
        /// Backend id or employee id
        employee: String,
        status: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SlipArgs {
    /// Backend id or employee id
    pub employee: String,
    #[arg(long, default_value = "")]
    pub designation: String,
    #[arg(long)]
    pub month: String,
    #[arg(long)]
    pub year: Option<String>,
    #[arg(long)]
    pub basic_salary: String,
    #[arg(long, default_value = "")]
    pub hra: String,
    #[arg(long, default_value = "")]
    pub allowances: String,
    #[arg(long, default_value = "")]
    pub deductions: String,
}

#[derive(Subcommand, Debug)]
pub enum SalarySlipCommand {
    /// Save a salary slip
    Create(SlipArgs),
    /// Save the salary slip as PDF
    Download(SlipArgs),
}

pub async fn run(command: AdminCommand, ctx: PortalContext) -> Result<(), ViewError> {
    match command {
        AdminCommand::Login { email, password } => {
            AuthView::new(ctx)
                .admin_login(&AdminLoginForm { email, password })
                .await?;
        }
        AdminCommand::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            let form = AdminRegisterForm {
                name,
                email,
                password,
                confirm_password,
            };
            AuthView::new(ctx).admin_register(&form).await?;
        }
        AdminCommand::Logout => AuthView::new(ctx).logout(Role::Admin)?,
        AdminCommand::Employees(cmd) => employees(cmd, ctx).await?,
        AdminCommand::OfferLetter(cmd) => offer_letter(cmd, ctx).await?,
        AdminCommand::SalarySlip(cmd) => salary_slip(cmd, ctx).await?,
    }
    Ok(())
}

async fn employees(command: EmployeesCommand, ctx: PortalContext) -> Result<(), ViewError> {
    let dashboard = AdminDashboard::mount(ctx.clone())?;
    match command {
        EmployeesCommand::List => {
            let employees = dashboard.refresh().await?;
            print_employees(&employees);
        }
        EmployeesCommand::Add {
            name,
            email,
            department,
            employee_id,
            start_date,
            expected_salary,
        } => {
            let form = EmployeeForm {
                name,
                email,
                department,
                employee_id,
                start_date,
                expected_salary,
            };
            dashboard.add_employee(&form).await?;
            print_employees(&dashboard.employees());
        }
        EmployeesCommand::Update {
            id,
            name,
            email,
            department,
            start_date,
            expected_salary,
        } => {
            let expected_salary = match expected_salary {
                Some(raw) => Some(
                    parse_decimal("expectedSalary", "Expected Salary", &raw)
                        .map_err(|e| ctx.fail(e))?,
                ),
                None => None,
            };
            let update = EmployeeUpdate {
                name,
                email,
                department,
                start_date,
                expected_salary,
            };
            dashboard.update_employee(&id, &update).await?;
            print_employees(&dashboard.employees());
        }
        EmployeesCommand::Delete { id, yes } => {
            if dashboard.delete_employee(&id, yes).await? {
                print_employees(&dashboard.employees());
            } else {
                println!("Re-run with --yes to delete {}", id);
            }
        }
    }
    Ok(())
}

async fn offer_letter(command: OfferLetterCommand, ctx: PortalContext) -> Result<(), ViewError> {
    match command {
        OfferLetterCommand::Create(args) => {
            letter_view(args, ctx).await?.submit().await?;
        }
        OfferLetterCommand::Preview(args) => {
            let view = letter_view(args, ctx).await?;
            print_tree(&view.preview());
        }
        OfferLetterCommand::Download(args) => {
            letter_view(args, ctx).await?.download().await?;
        }
        OfferLetterCommand::Status { employee, status } => {
            let record = lookup(&ctx, &employee).await?;
            AdminOfferLetterView::mount(ctx, record.as_ref())?
                .update_status(&status)
                .await?;
        }
    }
    Ok(())
}

async fn salary_slip(command: SalarySlipCommand, ctx: PortalContext) -> Result<(), ViewError> {
    let (args, download) = match command {
        SalarySlipCommand::Create(args) => (args, false),
        SalarySlipCommand::Download(args) => (args, true),
    };

    let record = lookup(&ctx, &args.employee).await?;
    let view = AdminSalarySlipView::mount(ctx, record.as_ref())?;
    view.set(SalaryField::Designation, args.designation);
    view.set(SalaryField::Month, args.month);
    if let Some(year) = args.year {
        view.set(SalaryField::Year, year);
    }
    view.set(SalaryField::BasicSalary, args.basic_salary);
    view.set(SalaryField::Hra, args.hra);
    view.set(SalaryField::Allowances, args.allowances);
    let net = view.set(SalaryField::Deductions, args.deductions);
    log::debug!("Net salary {}", net);

    if download {
        view.download().await?;
    } else {
        if let Ok(tree) = view.preview() {
            print_tree(&tree);
        }
        view.submit().await?;
    }
    Ok(())
}

async fn letter_view(args: LetterArgs, ctx: PortalContext) -> Result<AdminOfferLetterView, ViewError> {
    let template = match &args.message_file {
        Some(path) => Some(std::fs::read_to_string(path).map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add(ValidationError::new(
                "message",
                format!("Cannot read {}: {}", path.display(), e),
            ));
            ctx.fail(ViewError::Validation(errors))
        })?),
        None => None,
    };

    let record = lookup(&ctx, &args.employee).await?;
    let view = AdminOfferLetterView::mount(ctx, record.as_ref())?;
    view.edit(|draft| {
        if let Some(position) = args.position {
            draft.position = position;
        }
        if let Some(start_date) = args.start_date {
            draft.start_date = start_date;
        }
        if let Some(salary) = args.salary {
            draft.salary = salary;
        }
        draft.hiring_manager = args.hiring_manager;
        draft.manager_title = args.manager_title;
        if let Some(template) = template {
            draft.message_template = template;
        }
    });
    Ok(view)
}

/// Find an employee on the dashboard list by backend id or employee id.
async fn lookup(ctx: &PortalContext, key: &str) -> Result<Option<EmployeeRecord>, ViewError> {
    let dashboard = AdminDashboard::mount(ctx.clone())?;
    dashboard.refresh().await?;
    Ok(dashboard.find(key))
}

fn parse_decimal(field: &str, label: &str, raw: &str) -> Result<Decimal, ViewError> {
    Decimal::from_str(raw.trim()).map_err(|_| {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::invalid_number(field, label, raw.trim()));
        ViewError::Validation(errors)
    })
}
