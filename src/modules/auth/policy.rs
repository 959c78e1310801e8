//! Role requirements for the authentication module's protected routes.

use teslo_models::Role;

use crate::middleware::registry::{RegistryError, RoleRegistryBuilder};

pub mod operations {
    use crate::middleware::registry::OperationKey;

    pub const CHECK_STATUS: OperationKey = OperationKey::new("auth.check_status");
    pub const PRIVATE: OperationKey = OperationKey::new("auth.private");
    pub const PRIVATE_ADMIN: OperationKey = OperationKey::new("auth.private.admin");
    pub const PRIVATE_SUPER: OperationKey = OperationKey::new("auth.private.super");
}

/// `CHECK_STATUS` and `PRIVATE` only need a valid identity, so they are not declared.
pub fn declare_role_requirements(
    builder: RoleRegistryBuilder,
) -> Result<RoleRegistryBuilder, RegistryError> {
    builder
        .declare(operations::PRIVATE_ADMIN, [Role::Admin])?
        .declare(operations::PRIVATE_SUPER, [Role::Admin, Role::SuperUser])
}
