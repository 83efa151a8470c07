//! `safra calendar`, `safra metrics`, `safra window`.

use safra_recon::window::{expand, parse_window};
use safra_recon::{BucketItem, Month};

use crate::{print_json, CliError, Context, GlobalArgs};

pub fn cmd_calendar(global: &GlobalArgs, month: Option<String>, json: bool) -> Result<(), CliError> {
    let month = month.map(|code| parse_month(&code)).transpose()?;

    let mut ctx = Context::load(global)?;
    let snapshot = ctx.snapshot()?;

    for p in &snapshot.products {
        if let Some(note) = p.harvest_window.as_deref().and_then(window_note) {
            log::debug!("product {}: {note}", p.name);
        }
    }

    let report = safra_recon::run(&snapshot);

    if json {
        return match month {
            Some(m) => print_json(&serde_json::json!({
                "month": m,
                "label": m.label(),
                "items": report.months.get(m),
            })),
            None => print_json(&serde_json::json!({ "months": report.months })),
        };
    }

    let display = &ctx.settings.display;
    let months: Vec<Month> = match month {
        Some(m) => vec![m],
        None => Month::ALL.to_vec(),
    };
    for (i, m) in months.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", m.label());
        let items = report.months.get(*m);
        if items.is_empty() {
            println!("  {}", display.empty_month_label);
        }
        for item in items {
            println!("  {}", format_item(item, &display.origin_placeholder));
        }
    }

    Ok(())
}

/// Debug note for a window that is unparseable or crosses the year boundary.
fn window_note(window: &str) -> Option<String> {
    match parse_window(window) {
        None => Some(format!("unrecognized harvest window {window:?}")),
        Some(w) if w.wraps_year() => Some(format!("harvest window {}-{} crosses the year boundary", w.start, w.end)),
        Some(_) => None,
    }
}

fn format_item(item: &BucketItem, origin_placeholder: &str) -> String {
    let origin = if item.origin.trim().is_empty() {
        origin_placeholder
    } else {
        item.origin.as_str()
    };
    format!("{} {}  ({})", item.marker.glyph(), item.product, origin)
}

pub fn cmd_metrics(global: &GlobalArgs, json: bool) -> Result<(), CliError> {
    let mut ctx = Context::load(global)?;
    let snapshot = ctx.snapshot()?;
    let report = safra_recon::run(&snapshot);
    let m = &report.metrics;

    if json {
        return print_json(m);
    }

    println!("products:  {}", m.total_products);
    println!("tracked:   {}", m.tracked_products);
    println!("analyses:  {}", m.total_analyses);
    println!(
        "outlook:   {} / {} / {}  (positivo / neutro / negativo)",
        m.positive, m.neutral, m.negative
    );
    Ok(())
}

pub fn cmd_window(expr: &str) -> Result<(), CliError> {
    let set = expand(Some(expr));
    if set.is_empty() {
        eprintln!("{expr:?}: unrecognized window, no active months");
        return Ok(());
    }
    for m in set.active() {
        println!("{}  {}", m.code(), m.label());
    }
    Ok(())
}

fn parse_month(code: &str) -> Result<Month, CliError> {
    Month::from_code(code).ok_or_else(|| {
        CliError::args(format!("unknown month code: {code:?}"))
            .with_hint("use JAN, FEV, MAR, ABR, MAI, JUN, JUL, AGO, SET, OUT, NOV, DEZ")
    })
}
