#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication mechanisms,"]
#![doc = "store traits and implementations, services, routing configuration"]
#![doc = "and error handling for the TaskVault API. The main binary"]
#![doc = "(`main.rs`) wires these pieces together explicitly and runs the"]
#![doc = "server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod tasks;
