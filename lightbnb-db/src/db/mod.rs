//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - One shared connection pool, borrowed by every repository
//! - One statement per operation, no transactions
//! - Aggregates computed with JOINs in the same query - no N+1 queries
//! - Failures are logged and returned, never swallowed

pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_from_url, migrate};
pub use repos::*;
