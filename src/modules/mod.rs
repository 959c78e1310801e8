pub mod auth;

use crate::middleware::registry::{RegistryError, RoleRegistry};

/// Collects every module's role requirements into one registry.
///
/// Called once at startup. A duplicate or empty declaration fails the boot.
pub fn role_registry() -> Result<RoleRegistry, RegistryError> {
    let builder = RoleRegistry::builder();
    let builder = auth::policy::declare_role_requirements(builder)?;
    Ok(builder.build())
}
