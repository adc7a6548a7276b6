//! Backend services: submission workflow and session registry.

pub mod gateway;
pub mod registry;
pub mod store;
