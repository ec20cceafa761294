//! Tests for checkout request validation and form encoding.

use super::{CheckoutRequest, LineItem};

fn request() -> CheckoutRequest {
    CheckoutRequest::new("https://shop.example/ok", "https://shop.example/cancel")
        .with_line_item(LineItem::new("Midnight Drive (WAV)", 2999))
}

fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

mod line_item {
    use super::*;

    #[test]
    fn defaults_to_one_unit_in_usd() {
        let item = LineItem::new("Beat", 500);

        assert_eq!(item.currency, "usd");
        assert_eq!(item.quantity, 1);
        assert!(item.description.is_none());
    }

    #[test]
    fn builder_overrides_defaults() {
        let item = LineItem::new("Beat", 500)
            .with_currency("eur")
            .with_quantity(3)
            .with_description("Exclusive");

        assert_eq!(item.currency, "eur");
        assert_eq!(item.quantity, 3);
        assert_eq!(item.description.as_deref(), Some("Exclusive"));
    }
}

mod validate {
    use super::*;

    #[test]
    fn requires_a_line_item() {
        let err = CheckoutRequest::new("https://a.example", "https://b.example")
            .validate()
            .unwrap_err();

        assert_eq!(err.field(), Some("line_items"));
        assert_eq!(err.to_string(), "At least one line item is required");
    }

    #[test]
    fn line_items_are_checked_before_urls() {
        let err = CheckoutRequest::default().validate().unwrap_err();

        assert_eq!(err.field(), Some("line_items"));
    }

    #[test]
    fn requires_success_url() {
        let mut request = request();
        request.success_url = String::new();

        let err = request.validate().unwrap_err();

        assert_eq!(err.field(), Some("success_url"));
        assert_eq!(err.to_string(), "success_url and cancel_url are required");
    }

    #[test]
    fn requires_cancel_url() {
        let mut request = request();
        request.cancel_url = " ".to_string();

        assert_eq!(request.validate().unwrap_err().field(), Some("cancel_url"));
    }

    #[test]
    fn rejects_unnamed_item() {
        let request = request().with_line_item(LineItem::new("", 100));

        let err = request.validate().unwrap_err();

        assert_eq!(err.to_string(), "Line item 1 needs a name");
    }

    #[test]
    fn rejects_zero_quantity() {
        let request = request().with_line_item(LineItem::new("Stems", 100).with_quantity(0));

        let err = request.validate().unwrap_err();

        assert_eq!(err.to_string(), "Line item 1 needs a quantity of at least 1");
    }

    #[test]
    fn zero_amount_is_allowed() {
        let request = request().with_line_item(LineItem::new("Free sample", 0));

        assert!(request.validate().is_ok());
    }
}

mod form_fields {
    use super::*;

    #[test]
    fn flattens_items_with_bracketed_keys() {
        let fields = request().form_fields();

        assert_eq!(field(&fields, "mode"), Some("payment"));
        assert_eq!(field(&fields, "success_url"), Some("https://shop.example/ok"));
        assert_eq!(field(&fields, "cancel_url"), Some("https://shop.example/cancel"));
        assert_eq!(
            field(&fields, "line_items[0][price_data][currency]"),
            Some("usd")
        );
        assert_eq!(
            field(&fields, "line_items[0][price_data][unit_amount]"),
            Some("2999")
        );
        assert_eq!(
            field(&fields, "line_items[0][price_data][product_data][name]"),
            Some("Midnight Drive (WAV)")
        );
        assert_eq!(field(&fields, "line_items[0][quantity]"), Some("1"));
    }

    #[test]
    fn omits_absent_optionals() {
        let fields = request().form_fields();

        assert!(field(&fields, "customer_email").is_none());
        assert!(field(&fields, "line_items[0][price_data][product_data][description]").is_none());
        assert!(!fields.iter().any(|(k, _)| k.starts_with("metadata")));
    }

    #[test]
    fn includes_email_description_and_metadata() {
        let request = CheckoutRequest::new("https://a.example", "https://b.example")
            .with_line_item(LineItem::new("Beat", 100))
            .with_line_item(LineItem::new("Stems", 400).with_description("Track-outs"))
            .with_customer_email("fan@example.com")
            .with_metadata("beat_id", "42");

        let fields = request.form_fields();

        assert_eq!(field(&fields, "customer_email"), Some("fan@example.com"));
        assert_eq!(
            field(&fields, "line_items[1][price_data][product_data][description]"),
            Some("Track-outs")
        );
        assert_eq!(field(&fields, "line_items[1][quantity]"), Some("1"));
        assert_eq!(field(&fields, "metadata[beat_id]"), Some("42"));
    }
}
