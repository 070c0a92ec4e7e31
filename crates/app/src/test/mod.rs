//! Service integration test support.

mod db;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
