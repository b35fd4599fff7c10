//! Client library for connecting to rusved.
//!
//! Provides [`ServiceClient`], which exposes every call of the three services
//! with native types, over a single gRPC channel.

mod service_client;

pub use service_client::ServiceClient;
