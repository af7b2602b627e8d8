/// In-memory storage backend.
pub mod memory;
/// Storage abstraction layer for bracket state.
pub mod store;
