//! Routing table and proxy config output.

use std::fs;
use std::path::Path;

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, CellAlignment, ContentArrangement, Table};
use fleet_scout_common::{ProxyConfig, RoutingEntry};

use crate::error::Result;

/// Column order of the routing table.
pub const ROUTING_COLUMNS: [&str; 4] = ["model", "route", "ip", "tps"];

/// Write the routing table as CSV. Throughput is written with two decimals.
pub fn write_routing_csv(path: &Path, entries: &[RoutingEntry]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(ROUTING_COLUMNS)?;
    for entry in entries {
        let tps = format!("{:.2}", entry.tps);
        writer.write_record([
            entry.model.as_str(),
            entry.route.as_str(),
            entry.endpoint.as_str(),
            tps.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a routing table previously written by [`write_routing_csv`].
pub fn read_routing_csv(path: &Path) -> Result<Vec<RoutingEntry>> {
    let mut reader = csv::Reader::from_path(path)?;
    let entries = reader
        .deserialize()
        .collect::<std::result::Result<Vec<RoutingEntry>, csv::Error>>()?;
    Ok(entries)
}

/// Pretty JSON for a proxy config, two-space indented.
pub fn proxy_config_json(config: &ProxyConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

pub fn write_proxy_config(path: &Path, config: &ProxyConfig) -> Result<()> {
    fs::write(path, proxy_config_json(config)?)?;
    Ok(())
}

/// Render the routing table for the console.
pub fn render_table(entries: &[RoutingEntry]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header: Vec<Cell> = ROUTING_COLUMNS
        .iter()
        .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
        .collect();
    table.set_header(header);

    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.model),
            Cell::new(&entry.route),
            Cell::new(&entry.endpoint),
            Cell::new(format!("{:.2}", entry.tps)).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}
