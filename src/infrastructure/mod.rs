//! Infrastructure layer - External service implementations

pub mod credentials;
pub mod identity;
pub mod logging;
