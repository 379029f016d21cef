#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "A users-and-tasks REST API with a layered request-authorization"]
#![doc = "pipeline: an authentication gate (bearer token), an optional role"]
#![doc = "gate (allow-list) and an optional ownership gate (owner or admin),"]
#![doc = "composed per route in front of plain CRUD services. The binary"]
#![doc = "(`main.rs`) wires configuration, logging, the Postgres store and"]
#![doc = "the HTTP server around these modules."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod validation;
