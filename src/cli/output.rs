//! Output formatting helpers for CLI commands

use crate::geocode::{AggregateResult, LookupStatus};
use crate::provider::{Location, ProviderId};
use crate::status::CanonicalStatus;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// View model for provider display
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProviderView {
    pub provider: ProviderId,
    pub endpoint: String,
    /// Where the API key comes from, never the key itself
    pub key_source: String,
    pub request_count: u64,
    pub eligible: bool,
}

fn colored_lookup_status(status: LookupStatus) -> String {
    let text = status.as_str();
    match status {
        LookupStatus::Geocoded => text.green().to_string(),
        LookupStatus::ZeroResults => text.yellow().to_string(),
        LookupStatus::TemporaryGeocodeError => text.cyan().to_string(),
        LookupStatus::PermanentGeocodeError | LookupStatus::MultipleIssues => {
            text.red().to_string()
        }
    }
}

fn colored_attempt_status(status: CanonicalStatus) -> String {
    let text = status.as_str();
    match status {
        CanonicalStatus::Success => text.green().to_string(),
        CanonicalStatus::ZeroResults => text.yellow().to_string(),
        CanonicalStatus::TooManyRequests | CanonicalStatus::TemporaryError => {
            text.cyan().to_string()
        }
        _ => text.red().to_string(),
    }
}

fn format_bounds(location: &Location) -> String {
    match &location.bounds {
        Some(b) => format!(
            "{:.5},{:.5} .. {:.5},{:.5}",
            b.south_west.latitude,
            b.south_west.longitude,
            b.north_east.latitude,
            b.north_east.longitude
        ),
        None => "-".to_string(),
    }
}

/// Format a lookup result as a summary followed by location and attempt tables
pub fn format_lookup_table(result: &AggregateResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Status:   {}\nProvider: {}\nKey:      {}\n",
        colored_lookup_status(result.status),
        result.provider_name(),
        result.address_key
    ));

    if !result.locations.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["#", "Address", "Latitude", "Longitude", "Bounds"]);

        for (i, loc) in result.locations.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(&loc.formatted_address),
                Cell::new(format!("{:.6}", loc.point.latitude)),
                Cell::new(format!("{:.6}", loc.point.longitude)),
                Cell::new(format_bounds(loc)),
            ]);
        }
        out.push('\n');
        out.push_str(&table.to_string());
        out.push('\n');
    }

    if !result.attempts.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Attempt", "Provider", "Status"]);

        for (i, attempt) in result.attempts.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(attempt.provider),
                Cell::new(colored_attempt_status(attempt.status)),
            ]);
        }
        out.push('\n');
        out.push_str(&table.to_string());
        out.push('\n');
    }

    out
}

/// Format a lookup result as JSON
pub fn format_lookup_json(result: &AggregateResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Format providers as a table
pub fn format_providers_table(providers: &[ProviderView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Provider", "Endpoint", "Key", "Requests", "Eligible"]);

    for p in providers {
        let eligible = if p.eligible {
            "yes".green().to_string()
        } else {
            "throttled".yellow().to_string()
        };

        table.add_row(vec![
            Cell::new(p.provider),
            Cell::new(&p.endpoint),
            Cell::new(&p.key_source),
            Cell::new(p.request_count),
            Cell::new(eligible),
        ]);
    }

    table.to_string()
}

/// Format providers as JSON
pub fn format_providers_json(providers: &[ProviderView]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "providers": providers
    }))
}
