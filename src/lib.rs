//! Beatstore clients: typed access to the storefront's external services
//!
//! A library wrapping the content-delivery, transactional-email, payment
//! and REST data-store APIs behind one shape: validated configuration, a
//! typed request, and a typed response or a classified failure.
//!
//! Every client is generic over [`transport::Transport`], so the live
//! HTTP stack, the offline stub and test fakes are interchangeable.

pub mod config;
pub mod content;
pub mod email;
pub mod error;
pub mod payment;
pub mod store;
pub mod time;
pub mod transport;
