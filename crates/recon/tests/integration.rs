use std::path::PathBuf;

use safra_recon::buckets::bucket;
use safra_recon::builder::build;
use safra_recon::filter::AnalysisFilter;
use safra_recon::membership::is_tracked;
use safra_recon::window::expand;
use safra_recon::{aggregate::aggregate, views};
use safra_recon::{AnalysisRecord, Month, Product, Sentiment, SentimentMarker, Snapshot};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_analyses(name: &str) -> Vec<AnalysisRecord> {
    let path = fixtures_dir().join(name);
    let data = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    serde_json::from_str(&data).unwrap()
}

fn catalog() -> Vec<Product> {
    vec![
        Product::new("CAFÉ", "Brasil", Some("DEZ-MAR")),
        Product::new("SOJA", "Argentina", Some("MAR-JUN")),
        Product::new("CACAU", "", Some("OUT-MAR")),
        Product::new("MILHO", "Brasil", Some("XPTO-ABR")),
        Product::new("TRIGO", "Rússia", None),
        Product::new("ARROZ", "Vietnã", Some("jan-mar")),
    ]
}

// -------------------------------------------------------------------------
// Window expansion
// -------------------------------------------------------------------------

#[test]
fn documented_windows() {
    let active = |w: Option<&str>| expand(w).active().collect::<Vec<_>>();
    assert_eq!(active(Some("JAN-MAR")), vec![Month::Jan, Month::Fev, Month::Mar]);
    assert_eq!(active(Some("DEZ-MAR")), vec![Month::Jan, Month::Fev, Month::Mar, Month::Dez]);
    assert_eq!(active(Some("JUN-JUN")), vec![Month::Jun]);
    assert!(active(Some("XPTO-ABR")).is_empty());
    assert!(active(Some("")).is_empty());
    assert!(active(None).is_empty());
}

// -------------------------------------------------------------------------
// Full pipeline over fixtures
// -------------------------------------------------------------------------

#[test]
fn fixture_pipeline() {
    let analyses = load_analyses("analyses.json");
    let products = catalog();

    let entries = build(&products, &analyses);
    assert_eq!(entries.len(), products.len());

    let tracked: Vec<&str> = entries
        .iter()
        .filter(|e| e.tracked_in_report)
        .map(|e| e.product.as_str())
        .collect();
    assert_eq!(tracked, vec!["CAFÉ", "SOJA", "CACAU"]);

    let months = bucket(&entries, &analyses);

    // MAR: CAFÉ, SOJA, CACAU tracked; ARROZ untracked last
    let mar: Vec<(&str, SentimentMarker)> = months
        .get(Month::Mar)
        .iter()
        .map(|i| (i.product.as_str(), i.marker))
        .collect();
    assert_eq!(
        mar,
        vec![
            ("CAFÉ", SentimentMarker::Negative),
            ("SOJA", SentimentMarker::Positive),
            ("CACAU", SentimentMarker::Unknown),
            ("ARROZ", SentimentMarker::Untracked),
        ]
    );

    // MILHO has a malformed window, TRIGO has none
    for (_, items) in months.iter() {
        assert!(items.iter().all(|i| i.product != "MILHO" && i.product != "TRIGO"));
    }

    let d = aggregate(&analyses);
    assert_eq!(d.sentiments.values().sum::<usize>(), analyses.len());
    assert!(!d.countries.contains_key(""));
    assert_eq!(d.country_count("Brasil"), 2);
}

#[test]
fn filtered_stats_are_recomputed() {
    let analyses = load_analyses("analyses.json");
    let filter = AnalysisFilter::new(vec![Sentiment::Negative], vec![]);
    let subset = filter.apply_owned(&analyses);
    let d = aggregate(&subset);
    assert_eq!(d.sentiments.len(), 1);
    assert_eq!(d.sentiment_count(&Sentiment::Negative), subset.len());
}

#[test]
fn alerts_from_fixture() {
    let analyses = load_analyses("analyses.json");
    let alerts = views::alerts(&analyses);
    assert!(!alerts.is_empty());
    assert!(alerts.iter().all(|a| a.sentiment == Some(Sentiment::Negative)));
    let names: Vec<&str> = alerts.iter().map(|a| a.product.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn tracking_is_case_and_whitespace_insensitive() {
    let analyses: Vec<AnalysisRecord> = serde_json::from_str(r#"[{"produto": " CAFÉ "}]"#).unwrap();
    assert!(is_tracked("café", &analyses));
}

#[test]
fn spec_end_to_end() {
    let analyses: Vec<AnalysisRecord> =
        serde_json::from_str(r#"[{"produto": "CAFÉ", "pais": "Brasil", "sentimento": "NEGATIVO"}]"#).unwrap();
    let snapshot = Snapshot {
        products: vec![Product::new("CAFÉ", "Brasil", Some("DEZ-MAR"))],
        analyses,
    };
    let report = safra_recon::run(&snapshot);
    assert!(report.calendar[0].tracked_in_report);

    let json = serde_json::to_value(&report).unwrap();
    for code in ["DEZ", "JAN", "FEV", "MAR"] {
        let items = json["months"][code].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["marker"], "negative");
    }
    assert_eq!(json["distributions"]["sentiments"], serde_json::json!({"NEGATIVO": 1}));
    assert_eq!(json["distributions"]["countries"], serde_json::json!({"Brasil": 1}));
}
