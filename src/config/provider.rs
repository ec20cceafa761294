//! Identity of the wrapped third-party services.

use std::fmt;

/// A third-party service wrapped by one of the clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Content-delivery API.
    Contentful,
    /// Transactional email API.
    Resend,
    /// Checkout and payments API.
    Stripe,
    /// REST table store.
    Supabase,
}

impl Provider {
    /// Display name used in error messages and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Contentful => "Contentful",
            Self::Resend => "Resend",
            Self::Stripe => "Stripe",
            Self::Supabase => "Supabase",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
