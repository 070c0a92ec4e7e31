//! Product Handlers

pub(crate) mod buyer_index;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod details;
pub(crate) mod latest;
pub(crate) mod seller_index;
pub(crate) mod update;
