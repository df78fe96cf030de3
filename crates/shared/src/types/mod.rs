//! Common types used across the application.

pub mod currency;
pub mod group;
pub mod id;
pub mod pagination;

pub use currency::Currency;
pub use group::RoleGroup;
pub use id::*;
pub use pagination::{PageMeta, PageRequest, PageResponse};
