//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod create_flow;
pub mod delete_flow;
pub mod list_view;
pub mod resource_service;
pub mod session_service;

#[cfg(test)]
pub(crate) mod testing;
