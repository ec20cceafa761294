//! Checkout and webhook client for the payment provider.
//!
//! This module provides:
//! - Checkout session requests ([`LineItem`], [`CheckoutRequest`], [`CheckoutSession`])
//! - Webhook signing and verification ([`signature`])
//! - The client itself ([`PaymentClient`])

mod checkout;
mod client;
pub mod signature;

#[cfg(test)]
mod checkout_tests;

pub use checkout::{CheckoutRequest, CheckoutSession, LineItem};
pub use client::PaymentClient;
pub use signature::SignatureError;
