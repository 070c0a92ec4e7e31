//! Extension traits

mod depot;
mod identity;
mod result;
mod validation;

pub(crate) use depot::DepotExt as _;
pub(crate) use identity::IdentityExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use validation::ValidateExt as _;
