pub mod factory;
pub mod memory;
pub mod store;

pub use factory::{DbConfig, RepositoryFactory, RepositoryRegistry};
pub use memory::{MemoryStore, MemoryStoreFactory};
pub use store::{KeyValueStore, Mutation, RepositoryError, load_json, update_json};
