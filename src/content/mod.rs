//! Content-delivery client.
//!
//! Read-only access to published entries of one space/environment.

mod client;


pub use client::ContentClient;
