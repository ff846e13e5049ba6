//! SQLite storage backend for the ride ledger.

mod factory;
mod gateway;

pub use factory::SqliteGatewayFactory;
pub use gateway::SqliteGateway;
