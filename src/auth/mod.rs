pub mod jwt;

/// Role required for product mutations.
pub const ADMIN_ROLE: &str = "ADMIN";
