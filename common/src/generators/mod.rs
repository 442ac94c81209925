pub mod password_generator;

pub use password_generator::{PasswordGenerator, PasswordPolicy, DEFAULT_PASSWORD_LENGTH};
