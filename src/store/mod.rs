//! Record stores - file-backed and in-memory CRUD

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
