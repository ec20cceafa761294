//! REST table-store client.

mod client;

#[cfg(test)]
mod client_tests;

pub use client::{DataStoreClient, QueryOptions};
