//! Port definitions (interfaces for external adapters)
//!
//! Ports define the boundaries between the application layer and
//! infrastructure. The only outbound collaborator the council needs is a
//! model client; history and configuration are passed in as plain data.

pub mod model_client;
