use clap::{Args, Subcommand};

use super::output::print_tree;
use crate::session::Role;
use crate::views::{
    AuthView, EmployeeHome, EmployeeLoginForm, EmployeeOfferLetterView, EmployeeRegisterForm,
    EmployeeSalarySlipView, PortalContext, ViewError,
};

#[derive(Subcommand, Debug)]
pub enum EmployeeCommand {
    /// Log in as employee
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Register a new employee account
    Register(RegisterArgs),

    /// Drop the employee session
    Logout,

    /// Show the logged-in employee's profile
    Home,

    /// View, download or apply for an offer letter
    #[command(subcommand)]
    OfferLetter(OfferLetterCommand),

    /// View, download or request a salary slip
    #[command(subcommand)]
    SalarySlip(SalarySlipCommand),
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
    #[arg(long)]
    pub department: String,
    #[arg(long)]
    pub employee_id: String,
    #[arg(long, default_value = "")]
    pub phone_number: String,
    #[arg(long, default_value = "")]
    pub address: String,
}

#[derive(Subcommand, Debug)]
pub enum OfferLetterCommand {
    /// Print the issued offer letter
    Show,
    /// Save the issued offer letter as PDF
    Download,
    /// Apply for an offer letter
    Apply(ApplyArgs),
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[arg(long)]
    pub job_title: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub start_date: String,
    /// Expected annual salary
    #[arg(long)]
    pub salary: String,
    /// Defaults to the profile name
    #[arg(long)]
    pub full_name: Option<String>,
    /// Defaults to the profile department
    #[arg(long)]
    pub department: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum SalarySlipCommand {
    /// Print the most recent salary slip
    Show,
    /// Save the most recent salary slip as PDF
    Download,
    /// Request a salary slip
    Request(RequestArgs),
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    #[arg(long)]
    pub month: String,
    #[arg(long)]
    pub year: Option<String>,
    #[arg(long)]
    pub basic_salary: String,
    #[arg(long, default_value = "")]
    pub allowances: String,
    #[arg(long, default_value = "")]
    pub deductions: String,
}

pub async fn run(command: EmployeeCommand, ctx: PortalContext) -> Result<(), ViewError> {
    match command {
        EmployeeCommand::Login { email, password } => {
            AuthView::new(ctx)
                .employee_login(&EmployeeLoginForm { email, password })
                .await?;
        }
        EmployeeCommand::Register(args) => {
            let form = EmployeeRegisterForm {
                name: args.name,
                email: args.email,
                password: args.password,
                confirm_password: args.confirm_password,
                department: args.department,
                employee_id: args.employee_id,
                phone_number: args.phone_number,
                address: args.address,
            };
            AuthView::new(ctx).employee_register(&form).await?;
        }
        EmployeeCommand::Logout => AuthView::new(ctx).logout(Role::Employee)?,
        EmployeeCommand::Home => {
            let home = EmployeeHome::mount(ctx)?;
            let profile = home.profile();
            println!("{}", home.greeting());
            println!("Email:       {}", profile.email);
            println!("Department:  {}", profile.department.as_deref().unwrap_or("-"));
            println!("Employee ID: {}", profile.employee_id.as_deref().unwrap_or("-"));
        }
        EmployeeCommand::OfferLetter(cmd) => offer_letter(cmd, ctx).await?,
        EmployeeCommand::SalarySlip(cmd) => salary_slip(cmd, ctx).await?,
    }
    Ok(())
}

async fn offer_letter(command: OfferLetterCommand, ctx: PortalContext) -> Result<(), ViewError> {
    let view = EmployeeOfferLetterView::mount(ctx)?;
    match command {
        OfferLetterCommand::Show => match view.load().await? {
            Some(_) => {
                if let Some(tree) = view.preview() {
                    print_tree(&tree);
                }
            }
            None => println!("No offer letter has been issued yet"),
        },
        OfferLetterCommand::Download => {
            view.load().await?;
            view.download().await?;
        }
        OfferLetterCommand::Apply(args) => {
            view.edit(|form| {
                form.job_title = args.job_title;
                form.start_date = args.start_date;
                form.salary = args.salary;
                if let Some(name) = args.full_name {
                    form.full_name = name;
                }
                if let Some(department) = args.department {
                    form.department = department;
                }
            });
            view.apply().await?;
        }
    }
    Ok(())
}

async fn salary_slip(command: SalarySlipCommand, ctx: PortalContext) -> Result<(), ViewError> {
    let view = EmployeeSalarySlipView::mount(ctx)?;
    match command {
        SalarySlipCommand::Show => match view.load().await? {
            Some(_) => {
                if let Some(tree) = view.preview() {
                    print_tree(&tree);
                }
            }
            None => println!("No salary slip available yet"),
        },
        SalarySlipCommand::Download => {
            view.load().await?;
            view.download().await?;
        }
        SalarySlipCommand::Request(args) => {
            let net = view.edit(|form| {
                form.month = args.month;
                if let Some(year) = args.year {
                    form.year = year;
                }
                form.basic_salary = args.basic_salary;
                form.allowances = args.allowances;
                form.deductions = args.deductions;
            });
            log::debug!("Requested net salary {}", net);
            view.request().await?;
        }
    }
    Ok(())
}
