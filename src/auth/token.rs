//! Token payload and secret models.

pub mod claims;
pub mod secret;
