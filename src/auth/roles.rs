//! Role-based access decisions.
//!
//! Roles are plain labels compared by exact string match. There is no
//! hierarchy: `ADMIN` does not imply `USER`.

use crate::types::{AppError, Claims, Result};

/// Administrator role label.
pub const ROLE_ADMIN: &str = "ADMIN";
/// Standard user role label.
pub const ROLE_USER: &str = "USER";

/// Whether `role` is one of `allowed`. An empty list admits any role.
pub fn has_any_role(role: &str, allowed: &[&str]) -> bool {
    allowed.is_empty() || allowed.iter().any(|candidate| *candidate == role)
}

/// Fails with `Forbidden` unless the verified claims carry one of the allowed roles.
pub fn require_role(claims: &Claims, allowed: &[&str]) -> Result<()> {
    if has_any_role(&claims.role, allowed) {
        Ok(())
    } else {
        tracing::debug!(
            "Denied '{}' with role '{}' (requires one of {:?})",
            claims.sub,
            claims.role,
            allowed
        );
        Err(AppError::Forbidden(format!(
            "Role '{}' is not allowed to access this resource",
            claims.role
        )))
    }
}
