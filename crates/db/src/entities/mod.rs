//! `SeaORM` entity definitions.

pub mod prelude;

pub mod companies;
pub mod company_members;
pub mod expenses;
pub mod group_company_permissions;
pub mod groups;
pub mod revenues;
pub mod sessions;
pub mod user_groups;
pub mod users;
