use std::fmt;

use crate::session::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unauthenticated,
    Authenticated(Role),
}

impl GateState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, GateState::Authenticated(_))
    }
}

/// Navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Public entry surface; where rejected callers land.
    Entry,
    AdminLogin,
    EmployeeLogin,
    AdminDashboard,
    AdminOfferLetter,
    AdminSalarySlip,
    EmployeeHome,
    EmployeeOfferLetter,
    EmployeeSalarySlip,
}

impl Route {
    pub fn home(role: Role) -> Self {
        match role {
            Role::Admin => Route::AdminDashboard,
            Role::Employee => Route::EmployeeHome,
        }
    }

    pub fn login(role: Role) -> Self {
        match role {
            Role::Admin => Route::AdminLogin,
            Role::Employee => Route::EmployeeLogin,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::AdminLogin => "/admin/login",
            Route::EmployeeLogin => "/employee/login",
            Route::AdminDashboard => "/admin/dashboard",
            Route::AdminOfferLetter => "/admin/offer-letter",
            Route::AdminSalarySlip => "/admin/salary-slip",
            Route::EmployeeHome => "/employee/home",
            Route::EmployeeOfferLetter => "/employee/offer-letter",
            Route::EmployeeSalarySlip => "/employee/salary-slip",
        }
    }

    /// Routes reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Entry | Route::AdminLogin | Route::EmployeeLogin)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
