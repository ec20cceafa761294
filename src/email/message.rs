//! Email message and receipt types.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// Loose address shape: something, `@`, something, `.`, something.
static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .unwrap_or_else(|e| unreachable!("address pattern is invalid: {e}"))
});

/// Returns true if `address` has the shape `local@domain.tld`.
#[must_use]
pub fn is_valid_address(address: &str) -> bool {
    ADDRESS_PATTERN.is_match(address)
}

/// A file attached to an outbound email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// File name shown to the recipient
    pub filename: String,
    /// Base64-encoded content or a URL the provider fetches
    pub content: String,
    /// MIME type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl Attachment {
    /// Creates an attachment without an explicit MIME type.
    #[must_use]
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            content_type: None,
        }
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// An outbound email.
///
/// Empty strings are treated the same as absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html: Option<String>,
    /// Plain-text body
    pub text: Option<String>,
    /// Sender override; the configured sender is used otherwise
    pub from: Option<String>,
    /// Reply-to address
    pub reply_to: Option<String>,
    /// File attachments
    pub attachments: Vec<Attachment>,
    /// Custom email headers
    pub headers: BTreeMap<String, String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl EmailMessage {
    /// Creates a message with recipient and subject and no body yet.
    #[must_use]
    pub fn new(to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            ..Self::default()
        }
    }

    /// Sets the HTML body.
    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Sets the plain-text body.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Overrides the sender.
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Sets the reply-to address.
    #[must_use]
    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    /// Adds an attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Adds a custom header, replacing any previous value for `name`.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sender override, if non-empty.
    #[must_use]
    pub fn sender_override(&self) -> Option<&str> {
        present(self.from.as_deref())
    }

    /// Checks the message, reporting the first violated rule.
    ///
    /// Rules are checked in order: recipient present, subject present, at
    /// least one body form present, recipient shaped like an address.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] naming the offending field.
    pub fn validate(&self) -> ServiceResult<()> {
        if self.to.is_empty() {
            return Err(ServiceError::validation("to", "Recipient email (to) is required"));
        }
        if self.subject.is_empty() {
            return Err(ServiceError::validation("subject", "Email subject is required"));
        }
        if present(self.html.as_deref()).is_none() && present(self.text.as_deref()).is_none() {
            return Err(ServiceError::validation("body", "Either html or text content is required"));
        }
        if !is_valid_address(&self.to) {
            return Err(ServiceError::validation("to", "Invalid recipient email format"));
        }
        Ok(())
    }

    /// Wire representation of the message, sent from `from`.
    pub(crate) fn payload<'a>(&'a self, from: &'a str) -> SendPayload<'a> {
        SendPayload {
            from,
            to: [self.to.as_str()],
            subject: &self.subject,
            html: present(self.html.as_deref()),
            text: present(self.text.as_deref()),
            reply_to: present(self.reply_to.as_deref()),
            attachments: (!self.attachments.is_empty()).then_some(self.attachments.as_slice()),
            headers: (!self.headers.is_empty()).then_some(&self.headers),
        }
    }
}

/// JSON body of a send request.
#[derive(Debug, Serialize)]
pub(crate) struct SendPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachments: Option<&'a [Attachment]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<&'a BTreeMap<String, String>>,
}

/// Provider acknowledgement of an accepted email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailReceipt {
    /// Provider-assigned message id
    pub id: String,
    /// Sender actually used
    pub from: String,
    /// Recipient
    pub to: String,
    /// Delivery status; always `queued` on acceptance
    pub status: String,
}
