//! Transactional-email client.
//!
//! This module provides:
//! - The outbound message and its receipt ([`EmailMessage`], [`EmailReceipt`])
//! - Fixed notification templates ([`Purchase`], [`ContactForm`])
//! - The client itself ([`EmailClient`])

mod client;
mod message;
mod templates;


pub use client::EmailClient;
pub use message::{Attachment, EmailMessage, EmailReceipt, is_valid_address};
pub use templates::{ContactForm, Purchase, format_amount};
