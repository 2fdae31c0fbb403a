// --- File: crates/calpeek_gcal/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod routes;
pub mod service;

pub use handlers::GcalState;
pub use routes::routes;
