//! Persistence adapters for the user store.
//!
//! `MongoUserRepository` is the production adapter; `InMemoryUserRepository`
//! substitutes for it in tests and local runs. Document shapes in `models`
//! stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use user_directory::outbound::persistence::{connect, MongoUserRepository, StoreConfig};
//!
//! let store = connect(&StoreConfig::new("mongodb://localhost:27017", "directory")).await?;
//! let repo = MongoUserRepository::new(&store);
//! ```

mod memory_user_repository;
mod models;
mod mongo_user_repository;
mod store;

pub use memory_user_repository::InMemoryUserRepository;
pub use mongo_user_repository::MongoUserRepository;
pub use store::{
    DEFAULT_COLLECTION, DEFAULT_CONNECT_TIMEOUT, StoreConfig, StoreError, UserStore, connect,
};
