pub mod config;
pub mod conntrack;
pub mod error;
pub mod gateway_client;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod relay;
pub mod routes;
pub mod state;
pub mod users;
