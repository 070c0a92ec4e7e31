//! User Handlers

pub(crate) mod delete_account;
pub(crate) mod edit;
pub(crate) mod login;
pub(crate) mod register;
