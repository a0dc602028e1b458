//! Utility functions shared across the application.

mod files;
pub(crate) mod permissions;

pub use files::copy_file;
pub use permissions::restrict_file_permissions;
