pub mod calculations;
pub mod clock;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
pub mod tracker;

pub use clock::{Clock, FixedClock, SystemClock};
pub use db::{
    GatewayConfig, GatewayError, GatewayFactory, GatewayRegistry, InMemoryGateway,
    MemoryGatewayFactory, PersistenceGateway, StorageKey,
};
pub use error::{Missing, TrackerError, ValidationError};
pub use models::*;
pub use tracker::{Saved, Tracker};
