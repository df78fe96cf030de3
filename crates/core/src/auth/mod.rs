//! Credentials: Argon2id hashing for login and registration.

mod password;

pub use password::{PasswordError, hash_password, verify_password};
