//! Static role requirements per protected operation.
//!
//! Requirements are declared once while the application state is built and
//! the resulting [`RoleRegistry`] is shared read-only behind an `Arc`. There
//! is no way to change a requirement after [`RoleRegistryBuilder::build`].
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::registry::{OperationKey, RoleRegistry};
//! use teslo_models::Role;
//!
//! const DELETE_PRODUCT: OperationKey = OperationKey::new("products.delete");
//!
//! let registry = RoleRegistry::builder()
//!     .declare(DELETE_PRODUCT, [Role::Admin])?
//!     .build();
//!
//! assert!(registry.lookup(DELETE_PRODUCT).is_some());
//! ```

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use thiserror::Error;

use teslo_models::Role;

/// Stable identifier of a protected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationKey(&'static str);

impl OperationKey {
    pub const fn new(key: &'static str) -> Self {
        Self(key)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Roles of which a caller must hold at least one.
pub type RoleRequirement = BTreeSet<Role>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("role requirement for `{0}` declared more than once")]
    Duplicate(OperationKey),

    #[error("role requirement for `{0}` has no roles")]
    Empty(OperationKey),
}

#[derive(Debug, Default)]
pub struct RoleRegistryBuilder {
    requirements: HashMap<OperationKey, RoleRequirement>,
}

impl RoleRegistryBuilder {
    pub fn declare(
        mut self,
        operation: OperationKey,
        roles: impl IntoIterator<Item = Role>,
    ) -> Result<Self, RegistryError> {
        let roles: RoleRequirement = roles.into_iter().collect();
        if roles.is_empty() {
            return Err(RegistryError::Empty(operation));
        }
        if self.requirements.contains_key(&operation) {
            return Err(RegistryError::Duplicate(operation));
        }

        self.requirements.insert(operation, roles);
        Ok(self)
    }

    pub fn build(self) -> RoleRegistry {
        RoleRegistry {
            requirements: self.requirements,
        }
    }
}

#[derive(Debug, Default)]
pub struct RoleRegistry {
    requirements: HashMap<OperationKey, RoleRequirement>,
}

impl RoleRegistry {
    pub fn builder() -> RoleRegistryBuilder {
        RoleRegistryBuilder::default()
    }

    /// `None` means the operation has no role restriction.
    pub fn lookup(&self, operation: OperationKey) -> Option<&RoleRequirement> {
        self.requirements.get(&operation)
    }
}
