//! Checkout session request and response types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::error::{ServiceError, ServiceResult};

/// One purchasable line of a checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Product name shown on the checkout page
    pub name: String,
    /// Optional product description
    pub description: Option<String>,
    /// Unit price in minor currency units (cents)
    pub amount: u64,
    /// ISO currency code, lowercase
    pub currency: String,
    /// Number of units
    pub quantity: u32,
}

impl LineItem {
    /// Creates a single unit of `name` at `amount` cents, in the default currency.
    #[must_use]
    pub fn new(name: impl Into<String>, amount: u64) -> Self {
        Self {
            name: name.into(),
            description: None,
            amount,
            currency: defaults::CURRENCY.to_string(),
            quantity: 1,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Sets the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// Parameters of a checkout session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Items to purchase; at least one
    pub line_items: Vec<LineItem>,
    /// Redirect target after payment
    pub success_url: String,
    /// Redirect target when the customer backs out
    pub cancel_url: String,
    /// Pre-filled customer address
    pub customer_email: Option<String>,
    /// Free-form metadata attached to the session
    pub metadata: BTreeMap<String, String>,
}

impl CheckoutRequest {
    /// Creates a request with both redirect targets and no items yet.
    #[must_use]
    pub fn new(success_url: impl Into<String>, cancel_url: impl Into<String>) -> Self {
        Self {
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
            ..Self::default()
        }
    }

    /// Adds a line item.
    #[must_use]
    pub fn with_line_item(mut self, item: LineItem) -> Self {
        self.line_items.push(item);
        self
    }

    /// Pre-fills the customer address.
    #[must_use]
    pub fn with_customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Checks the request, reporting the first violated rule.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] when there are no line items,
    /// a redirect URL is empty, or a line item has no name or zero quantity.
    pub fn validate(&self) -> ServiceResult<()> {
        if self.line_items.is_empty() {
            return Err(ServiceError::validation(
                "line_items",
                "At least one line item is required",
            ));
        }
        if self.success_url.trim().is_empty() || self.cancel_url.trim().is_empty() {
            let field = if self.success_url.trim().is_empty() {
                "success_url"
            } else {
                "cancel_url"
            };
            return Err(ServiceError::validation(
                field,
                "success_url and cancel_url are required",
            ));
        }
        for (index, item) in self.line_items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(ServiceError::validation(
                    "line_items",
                    format!("Line item {index} needs a name"),
                ));
            }
            if item.quantity == 0 {
                return Err(ServiceError::validation(
                    "line_items",
                    format!("Line item {index} needs a quantity of at least 1"),
                ));
            }
        }
        Ok(())
    }

    /// Flattens the request into the provider's bracketed form fields.
    pub(crate) fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), self.success_url.clone()),
            ("cancel_url".to_string(), self.cancel_url.clone()),
        ];

        if let Some(email) = self.customer_email.as_deref().filter(|e| !e.is_empty()) {
            fields.push(("customer_email".to_string(), email.to_string()));
        }

        for (i, item) in self.line_items.iter().enumerate() {
            let prefix = format!("line_items[{i}]");
            fields.push((
                format!("{prefix}[price_data][currency]"),
                item.currency.clone(),
            ));
            fields.push((
                format!("{prefix}[price_data][unit_amount]"),
                item.amount.to_string(),
            ));
            fields.push((
                format!("{prefix}[price_data][product_data][name]"),
                item.name.clone(),
            ));
            if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
                fields.push((
                    format!("{prefix}[price_data][product_data][description]"),
                    description.to_string(),
                ));
            }
            fields.push((format!("{prefix}[quantity]"), item.quantity.to_string()));
        }

        for (key, value) in &self.metadata {
            fields.push((format!("metadata[{key}]"), value.clone()));
        }

        fields
    }
}

/// A created checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Session identifier
    pub id: String,
    /// Hosted checkout page to redirect the customer to
    pub url: String,
    /// Session status (`open` on creation)
    pub status: String,
}
