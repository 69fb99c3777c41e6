// Library for the agent binary and for tests

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod models;
pub mod probe;
pub mod routes;
pub mod snapshot;
pub mod version;
