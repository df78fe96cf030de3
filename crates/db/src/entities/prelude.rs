//! Entity re-exports.

pub use super::companies::Entity as Companies;
pub use super::company_members::Entity as CompanyMembers;
pub use super::expenses::Entity as Expenses;
pub use super::group_company_permissions::Entity as GroupCompanyPermissions;
pub use super::groups::Entity as Groups;
pub use super::revenues::Entity as Revenues;
pub use super::sessions::Entity as Sessions;
pub use super::user_groups::Entity as UserGroups;
pub use super::users::Entity as Users;
