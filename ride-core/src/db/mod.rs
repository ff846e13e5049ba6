pub mod factory;
pub mod gateway;
pub mod memory;

pub use factory::{GatewayConfig, GatewayFactory, GatewayRegistry};
pub use gateway::{GatewayError, PersistenceGateway, StorageKey};
pub use memory::{InMemoryGateway, MemoryGatewayFactory};
