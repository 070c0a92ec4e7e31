//! Auth data models.

use crate::domain::users::records::{Role, UserUuid};

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user: UserUuid,
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub const fn is_buyer(&self) -> bool {
        matches!(self.role, Role::Buyer)
    }

    #[must_use]
    pub const fn is_seller(&self) -> bool {
        matches!(self.role, Role::Seller)
    }
}
