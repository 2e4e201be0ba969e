//! Dependency client handles
//!
//! Probes never create or look up their own connections; they receive
//! already-initialized handles from this module at construction time, so
//! tests can substitute doubles without touching global state.

pub mod cache;
pub mod database;

pub use cache::{CacheClient, RedisCache};
pub use database::{DatabasePool, PoolStats, SeaOrmPool};
