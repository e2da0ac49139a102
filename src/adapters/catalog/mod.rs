//! Persona catalog adapters.
//!
//! - **YamlPersonaCatalog** - Catalog file validated at load, plus the bundled seed
//! - **InMemoryPersonaCatalog** - Archetypes held in memory (testing)

mod in_memory_catalog;
mod yaml_catalog;

pub use in_memory_catalog::InMemoryPersonaCatalog;
pub use yaml_catalog::YamlPersonaCatalog;
