//! Company membership and group checks for gated pages.
//!
//! Every company page resolves a company id from its path. What the viewer
//! needs beyond a valid session depends on the page's [`AccessLevel`].

use thiserror::Error;

use finboard_shared::types::{CompanyId, RoleGroup, UserId};

/// Permission codename granted to a company's own group.
pub const VIEW_COMPANY: &str = "view_company";

/// Name of the per-company group created at registration.
#[must_use]
pub fn company_group_name(company: CompanyId) -> String {
    format!("company_{company}")
}

/// What a page requires from the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Any logged-in user.
    Authenticated,
    /// A member of the company in the path.
    CompanyMember,
    /// A member of the company in the path who is also in `Managers`.
    CompanyManager,
}

/// Access check failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The viewer may not open the page.
    #[error("Forbidden.")]
    Forbidden,
}

/// The requesting user as the access check sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    /// The authenticated user.
    pub user_id: UserId,
    /// Company the user is a member of, if any.
    pub company_id: Option<CompanyId>,
    /// Names of the groups the user belongs to.
    pub groups: Vec<String>,
}

impl Viewer {
    /// True when the user is in the `Managers` group.
    #[must_use]
    pub fn is_manager(&self) -> bool {
        self.groups.iter().any(|g| g == RoleGroup::Managers.name())
    }

    /// True when the user is a member of `company`.
    #[must_use]
    pub fn belongs_to(&self, company: CompanyId) -> bool {
        self.company_id == Some(company)
    }
}

/// Decides whether `viewer` may open a page of `company` at `level`.
///
/// # Errors
///
/// Returns `AccessError::Forbidden` when the viewer's membership or groups
/// do not satisfy the level.
pub fn authorize(
    viewer: &Viewer,
    level: AccessLevel,
    company: CompanyId,
) -> Result<(), AccessError> {
    let allowed = match level {
        AccessLevel::Authenticated => true,
        AccessLevel::CompanyMember => viewer.belongs_to(company),
        AccessLevel::CompanyManager => viewer.belongs_to(company) && viewer.is_manager(),
    };

    if allowed { Ok(()) } else { Err(AccessError::Forbidden) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn own_company() -> CompanyId {
        CompanyId::from_uuid(Uuid::from_u128(1))
    }

    fn other_company() -> CompanyId {
        CompanyId::from_uuid(Uuid::from_u128(2))
    }

    fn viewer(company: Option<CompanyId>, groups: &[&str]) -> Viewer {
        Viewer {
            user_id: UserId::from_uuid(Uuid::from_u128(42)),
            company_id: company,
            groups: groups.iter().map(ToString::to_string).collect(),
        }
    }

    #[rstest]
    #[case::manager_own(Some(own_company()), &["Managers"], AccessLevel::CompanyManager, true)]
    #[case::employee_own(Some(own_company()), &["Employees"], AccessLevel::CompanyManager, false)]
    #[case::manager_other(Some(other_company()), &["Managers"], AccessLevel::CompanyManager, false)]
    #[case::no_membership(None, &["Managers"], AccessLevel::CompanyManager, false)]
    #[case::employee_member(Some(own_company()), &["Employees"], AccessLevel::CompanyMember, true)]
    #[case::outsider_member(Some(other_company()), &["Employees"], AccessLevel::CompanyMember, false)]
    #[case::outsider_session(Some(other_company()), &[], AccessLevel::Authenticated, true)]
    #[case::unaffiliated_session(None, &[], AccessLevel::Authenticated, true)]
    fn test_authorize_matrix(
        #[case] company: Option<CompanyId>,
        #[case] groups: &[&str],
        #[case] level: AccessLevel,
        #[case] allowed: bool,
    ) {
        let result = authorize(&viewer(company, groups), level, own_company());
        assert_eq!(result.is_ok(), allowed);
    }

    #[test]
    fn test_company_group_is_not_a_role_group() {
        let group = company_group_name(own_company());
        let v = viewer(Some(own_company()), &[group.as_str()]);
        assert!(!v.is_manager());
        assert_eq!(
            authorize(&v, AccessLevel::CompanyManager, own_company()),
            Err(AccessError::Forbidden)
        );
    }

    #[test]
    fn test_forbidden_message() {
        assert_eq!(AccessError::Forbidden.to_string(), "Forbidden.");
    }

    #[test]
    fn test_company_group_name_format() {
        assert_eq!(
            company_group_name(own_company()),
            "company_00000000-0000-0000-0000-000000000001"
        );
    }
}
