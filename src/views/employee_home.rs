use super::{PortalContext, Surface, ViewError};
use crate::session::{Profile, Role};

/// Employee landing view; shows the profile from the session.
pub struct EmployeeHome {
    surface: Surface,
}

impl EmployeeHome {
    pub fn mount(ctx: PortalContext) -> Result<Self, ViewError> {
        Ok(Self {
            surface: Surface::mount(ctx, Role::Employee)?,
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.surface.session().profile
    }

    pub fn greeting(&self) -> String {
        format!("Welcome, {}", self.profile().name)
    }

    pub fn logout(self) -> Result<(), ViewError> {
        self.surface.logout()
    }
}
