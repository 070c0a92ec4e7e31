//! Cart Handlers

pub(crate) mod add;
pub(crate) mod count;
pub(crate) mod data;
pub(crate) mod remove_item;
pub(crate) mod update_quantity;
