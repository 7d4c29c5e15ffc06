pub mod disabled;
pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use disabled::DisabledStorage;
pub use memory::MemoryStorage;

#[cfg(feature = "sqlite")]
pub use sqlite::SQLiteStorage;
