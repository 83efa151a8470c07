//! `safra alerts`, `safra analyses`, `safra stats`.

use clap::Args;
use serde::Serialize;

use safra_recon::aggregate::aggregate;
use safra_recon::filter::available_countries;
use safra_recon::views::{alerts, group_by_sentiment};
use safra_recon::{AnalysisFilter, AnalysisRecord, Distributions, Sentiment};

use crate::exit_codes::EXIT_ALERTS_PRESENT;
use crate::{print_json, CliError, Context, GlobalArgs};

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Keep only this sentiment (repeatable): POSITIVO, NEUTRO, NEGATIVO
    #[arg(long = "sentiment", value_name = "SENTIMENT", value_parser = parse_sentiment)]
    pub sentiments: Vec<Sentiment>,

    /// Keep only this country (repeatable)
    #[arg(long = "country", value_name = "COUNTRY")]
    pub countries: Vec<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> AnalysisFilter {
        AnalysisFilter::new(self.sentiments.clone(), self.countries.clone())
    }
}

fn parse_sentiment(s: &str) -> Result<Sentiment, String> {
    match Sentiment::parse(s) {
        Some(sentiment) if sentiment.is_known() => Ok(sentiment),
        _ => Err(format!("expected POSITIVO, NEUTRO or NEGATIVO, got {s:?}")),
    }
}

/// Analysis with its link list cut to the display limit.
fn limit_links(a: &AnalysisRecord, limit: usize) -> AnalysisRecord {
    let mut out = a.clone();
    out.links.truncate(limit);
    out
}

fn print_analysis(a: &AnalysisRecord, link_limit: usize) {
    let sentiment = a.sentiment.as_ref().map(Sentiment::as_str).unwrap_or("NEUTRO");
    println!("  [{sentiment}] {} ({})", a.product, a.country);
    if !a.summary.is_empty() {
        println!("    {}", a.summary);
    }
    for link in a.links.iter().take(link_limit) {
        println!("    - {}  <{}>", link.title, link.url);
        println!("      data: {}", link.date.as_deref().unwrap_or("N/A"));
    }
}

fn print_distributions(d: &Distributions) {
    println!("by sentiment:");
    for (s, n) in &d.sentiments {
        println!("  {:<10} {n}", s.as_str());
    }
    println!("by country:");
    for (c, n) in &d.countries {
        println!("  {c:<10} {n}");
    }
}

pub fn cmd_alerts(global: &GlobalArgs, json: bool, fail_on_alert: bool) -> Result<(), CliError> {
    let mut ctx = Context::load(global)?;
    let snapshot = ctx.snapshot()?;
    let limit = ctx.settings.display.alerts_link_limit;
    let found = alerts(&snapshot.analyses);

    if json {
        let out: Vec<AnalysisRecord> = found.iter().map(|a| limit_links(a, limit)).collect();
        print_json(&out)?;
    } else if found.is_empty() {
        println!("Nenhum produto em alerta no momento.");
    } else {
        for a in &found {
            print_analysis(a, limit);
        }
    }

    if fail_on_alert && !found.is_empty() {
        return Err(CliError {
            code: EXIT_ALERTS_PRESENT,
            message: format!("{} product(s) with negative outlook", found.len()),
            hint: None,
        });
    }
    Ok(())
}

#[derive(Serialize)]
struct SentimentGroup {
    sentiment: Sentiment,
    analyses: Vec<AnalysisRecord>,
}

#[derive(Serialize)]
struct AnalysesOutput {
    groups: Vec<SentimentGroup>,
    distributions: Distributions,
}

pub fn cmd_analyses(global: &GlobalArgs, filter: FilterArgs, json: bool) -> Result<(), CliError> {
    let mut ctx = Context::load(global)?;
    let snapshot = ctx.snapshot()?;
    let limit = ctx.settings.display.analyses_link_limit;

    let selected = filter.to_filter().apply_owned(&snapshot.analyses);
    let groups = group_by_sentiment(&selected);
    let distributions = aggregate(&selected);

    if json {
        let out = AnalysesOutput {
            groups: groups
                .iter()
                .map(|(sentiment, items)| SentimentGroup {
                    sentiment: sentiment.clone(),
                    analyses: items.iter().map(|a| limit_links(a, limit)).collect(),
                })
                .collect(),
            distributions,
        };
        return print_json(&out);
    }

    if selected.is_empty() {
        println!("Nenhuma análise corresponde aos filtros selecionados.");
        return Ok(());
    }

    for (sentiment, items) in &groups {
        println!("{sentiment}");
        for a in items {
            print_analysis(a, limit);
        }
        println!();
    }
    print_distributions(&distributions);
    Ok(())
}

#[derive(Serialize)]
struct StatsOutput {
    #[serde(flatten)]
    distributions: Distributions,
    available_countries: Vec<String>,
}

pub fn cmd_stats(global: &GlobalArgs, filter: FilterArgs, json: bool) -> Result<(), CliError> {
    let mut ctx = Context::load(global)?;
    let snapshot = ctx.snapshot()?;

    let selected = filter.to_filter().apply_owned(&snapshot.analyses);
    let distributions = aggregate(&selected);

    if json {
        return print_json(&StatsOutput {
            distributions,
            available_countries: available_countries(&snapshot.analyses),
        });
    }

    log::info!("{} of {} analyses selected", selected.len(), snapshot.analyses.len());
    print_distributions(&distributions);
    Ok(())
}
