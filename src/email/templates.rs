//! Fixed notification templates.
//!
//! Bodies are rendered with Handlebars; every interpolated value is
//! HTML-escaped.

use handlebars::{Handlebars, RenderError};
use serde::Serialize;

const PURCHASE_TEMPLATE: &str = r#"
<h1>Thank you for your purchase!</h1>
<p>You have purchased <strong>{{product_name}}</strong> ({{license_type}} license).</p>
<p>Amount: {{amount}}</p>
<p><a href="{{download_url}}">Download your files</a></p>
<p>If you have any questions, reply to this email.</p>
<p>- Russ A Buss</p>
"#;

const CONTACT_TEMPLATE: &str = r"
<h2>New Contact Form Submission</h2>
<p><strong>Name:</strong> {{first_name}} {{last_name}}</p>
<p><strong>Email:</strong> {{email}}</p>
<p><strong>Services:</strong> {{services}}</p>
<p><strong>Notes:</strong></p>
<p>{{notes}}</p>
";

/// Formats an amount in cents as dollars with two decimals, e.g. `$80.00`.
#[must_use]
pub fn format_amount(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// A completed purchase, as reported to the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    /// Name of the purchased product
    pub product_name: String,
    /// License tier (e.g. MP3, WAV, Stems)
    pub license_type: String,
    /// Amount paid, in cents
    pub amount_cents: u64,
    /// Link to the purchased files
    pub download_url: String,
}

#[derive(Serialize)]
struct PurchaseData<'a> {
    product_name: &'a str,
    license_type: &'a str,
    amount: String,
    download_url: &'a str,
}

impl Purchase {
    /// Subject line of the confirmation.
    #[must_use]
    pub fn subject(&self) -> String {
        format!("Your purchase: {}", self.product_name)
    }

    /// Renders the confirmation body.
    ///
    /// # Errors
    ///
    /// Returns the template engine's error if rendering fails.
    pub fn render_html(&self) -> Result<String, RenderError> {
        let data = PurchaseData {
            product_name: &self.product_name,
            license_type: &self.license_type,
            amount: format_amount(self.amount_cents),
            download_url: &self.download_url,
        };
        Handlebars::new().render_template(PURCHASE_TEMPLATE, &data)
    }
}

/// A contact-form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    /// Submitter first name
    pub first_name: String,
    /// Submitter last name
    pub last_name: String,
    /// Submitter address; used as reply-to
    pub email: String,
    /// Requested services
    pub services: Vec<String>,
    /// Free-form notes
    pub notes: String,
}

#[derive(Serialize)]
struct ContactData<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    services: String,
    notes: &'a str,
}

impl ContactForm {
    /// Subject line of the notification.
    #[must_use]
    pub fn subject(&self) -> String {
        format!("Contact form: {} {}", self.first_name, self.last_name)
    }

    /// Renders the notification body.
    ///
    /// # Errors
    ///
    /// Returns the template engine's error if rendering fails.
    pub fn render_html(&self) -> Result<String, RenderError> {
        let data = ContactData {
            first_name: &self.first_name,
            last_name: &self.last_name,
            email: &self.email,
            services: self.services.join(", "),
            notes: &self.notes,
        };
        Handlebars::new().render_template(CONTACT_TEMPLATE, &data)
    }
}
