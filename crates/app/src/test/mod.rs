//! Postgres-backed test harness

mod context;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
