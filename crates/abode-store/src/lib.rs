//! Abode Store — Implementations of the session-store contract.

pub mod memory;
pub mod redis;

pub use memory::MemoryStore;
pub use redis::RedisStore;
