//! Role groups a company member can be placed in.

use serde::{Deserialize, Serialize};

/// Role groups shared by all companies.
///
/// Besides these, every company gets its own `company_<id>` group that
/// carries object permissions on the company row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleGroup {
    /// Can open the income statement and cash flow pages and onboard employees.
    Managers,
    /// Regular staff.
    Employees,
}

impl RoleGroup {
    /// All role groups.
    pub const ALL: [Self; 2] = [Self::Managers, Self::Employees];

    /// Returns the group name as stored in the `groups` table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Managers => "Managers",
            Self::Employees => "Employees",
        }
    }
}

impl std::fmt::Display for RoleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for RoleGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown group: {s}"))
    }
}
