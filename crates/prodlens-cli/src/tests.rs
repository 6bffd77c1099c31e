use super::*;

#[test]
fn parses_analyze_with_zipcode_and_json() {
    let cli = Cli::try_parse_from([
        "prodlens-cli",
        "analyze",
        "https://www.amazon.com/dp/B0TEST",
        "--zipcode",
        "10001",
        "--json",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Analyze {
            url,
            zipcode,
            json,
            proxy_base,
        } => {
            assert_eq!(url, "https://www.amazon.com/dp/B0TEST");
            assert_eq!(zipcode.as_deref(), Some("10001"));
            assert!(json);
            assert!(proxy_base.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn analyze_requires_url() {
    assert!(Cli::try_parse_from(["prodlens-cli", "analyze"]).is_err());
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["prodlens-cli"]).is_err());
}

#[test]
fn deal_accepts_negative_looking_discount() {
    let cli = Cli::try_parse_from([
        "prodlens-cli",
        "deal",
        "--discount",
        "-19%",
        "--savings",
        "300",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Deal {
            ref discount,
            initial_price: None,
            ..
        } if discount == "-19%"
    ));
}

#[test]
fn deal_defaults_currency_to_usd() {
    let cli = Cli::try_parse_from(["prodlens-cli", "deal", "--discount", "10%"])
        .expect("expected valid cli args");
    match cli.command {
        Commands::Deal {
            currency, savings, ..
        } => {
            assert_eq!(currency, "USD");
            assert!(savings.abs() < f64::EPSILON);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn proxy_url_takes_explicit_base() {
    let cli = Cli::try_parse_from([
        "prodlens-cli",
        "proxy-url",
        "https://m.media-amazon.com/images/I/a.jpg",
        "--base",
        "https://host.example.com",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::ProxyUrl { ref base, .. } if base == "https://host.example.com"
    ));
}

#[test]
fn specs_parse_type_value_pairs() {
    let cli = Cli::try_parse_from(["prodlens-cli", "specs", "Colour=Red", "Brand = Acme"])
        .expect("expected valid cli args");
    match cli.command {
        Commands::Specs { specs } => assert_eq!(
            specs,
            vec![
                Specification::new("Colour", "Red"),
                Specification::new("Brand", "Acme"),
            ]
        ),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn specs_reject_malformed_pair() {
    assert!(Cli::try_parse_from(["prodlens-cli", "specs", "no-equals-sign"]).is_err());
    assert!(parse_spec("Weight=2=kg").is_ok_and(|s| s.value == "2=kg"));
}
