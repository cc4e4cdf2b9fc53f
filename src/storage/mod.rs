//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::{InMemoryCourseStore, InMemoryUserStore, in_memory_stores};
#[cfg(feature = "postgres")]
pub use postgres::{PostgresCourseStore, PostgresUserStore};
