//! Session Store Adapters
//!
//! ## Available Adapters
//!
//! - **FileSessionStore** - One YAML file per user
//! - **InMemorySessionStore** - Sessions in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSessionStore, InMemorySessionStore};
//!
//! let store = FileSessionStore::new("./data/sessions");
//! let store = InMemorySessionStore::new();
//! ```

mod file_session_store;
mod in_memory_session_store;

pub use file_session_store::FileSessionStore;
pub use in_memory_session_store::InMemorySessionStore;
