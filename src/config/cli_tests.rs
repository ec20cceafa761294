//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::cli::{Cli, Command, parse_key_value, parse_line_item};

fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["beatstore"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

mod parsing {
    use super::*;

    #[test]
    fn parse_entry_command() {
        let cli = cli(&["entry", "demo-beat-1"]);

        assert!(matches!(cli.command, Command::Entry { ref id } if id == "demo-beat-1"));
        assert!(!cli.live);
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = cli(&["entries", "--config", "site.toml", "-v", "--live"]);

        assert_eq!(cli.config, Some(PathBuf::from("site.toml")));
        assert!(cli.verbose);
        assert!(cli.live);
    }

    #[test]
    fn parse_repeated_query_preserves_order() {
        let cli = cli(&["select", "beats", "-q", "available=eq.true", "-q", "order=bpm.asc"]);

        match cli.command {
            Command::Select { table, query } => {
                assert_eq!(table, "beats");
                assert_eq!(
                    query,
                    vec![
                        ("available".to_string(), "eq.true".to_string()),
                        ("order".to_string(), "bpm.asc".to_string()),
                    ]
                );
            }
            other => panic!("Expected select, got {other:?}"),
        }
    }

    #[test]
    fn parse_checkout_items() {
        let cli = cli(&[
            "checkout",
            "--item",
            "Midnight Trap (WAV)=8000",
            "--item",
            "Stems=15000",
            "--success-url",
            "https://russabuss.com/thanks",
            "--cancel-url",
            "https://russabuss.com/beats",
        ]);

        match cli.command {
            Command::Checkout { items, metadata, customer_email, .. } => {
                assert_eq!(
                    items,
                    vec![
                        ("Midnight Trap (WAV)".to_string(), 8000),
                        ("Stems".to_string(), 15000),
                    ]
                );
                assert!(metadata.is_empty());
                assert!(customer_email.is_none());
            }
            other => panic!("Expected checkout, got {other:?}"),
        }
    }

    #[test]
    fn parse_contact_notification_services() {
        let cli = cli(&[
            "contact-notification",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--email",
            "ada@example.com",
            "--service",
            "Mixing",
            "--service",
            "Mastering",
        ]);

        match cli.command {
            Command::ContactNotification { services, notes, .. } => {
                assert_eq!(services, vec!["Mixing", "Mastering"]);
                assert_eq!(notes, "");
            }
            other => panic!("Expected contact-notification, got {other:?}"),
        }
    }

    #[test]
    fn init_uses_default_output() {
        let cli = cli(&["init"]);

        assert!(cli.is_init());
        assert!(matches!(cli.command, Command::Init { ref output } if output == &PathBuf::from("beatstore.toml")));
    }

    #[test]
    fn invalid_item_is_rejected() {
        let result = <Cli as clap::Parser>::try_parse_from([
            "beatstore",
            "checkout",
            "--item",
            "Beat=free",
            "--success-url",
            "a",
            "--cancel-url",
            "b",
        ]);

        assert!(result.is_err());
    }
}

mod value_parsers {
    use super::*;

    #[test]
    fn key_value_splits_on_first_equals() {
        assert_eq!(
            parse_key_value("filter=a=b").unwrap(),
            ("filter".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn key_value_allows_empty_value() {
        assert_eq!(
            parse_key_value("notes=").unwrap(),
            ("notes".to_string(), String::new())
        );
    }

    #[test]
    fn key_value_rejects_missing_equals_and_empty_key() {
        assert!(parse_key_value("limit").is_err());
        assert!(parse_key_value(" =1").is_err());
    }

    #[test]
    fn line_item_splits_on_last_equals() {
        assert_eq!(
            parse_line_item("A=B=100").unwrap(),
            ("A=B".to_string(), 100)
        );
    }

    #[test]
    fn line_item_rejects_negative_amount() {
        assert!(parse_line_item("Beat=-1").is_err());
    }
}
