// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Command-line front end: run the assignment engine over a JSON event
//! snapshot and print the resulting plan and warnings.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tableplan::snapshot::{JsonEventFile, JsonPlanWriter};
use tableplan::{AssignmentEngine, EventId, SolverConfig};

#[derive(Debug, Parser)]
#[command(name = "tableplan", about = "Assign event guests to seating tables")]
struct Cli {
    /// Event snapshot JSON file (guests and tables).
    input: PathBuf,

    /// Write the computed plan to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Disable the AC-3 re-propagation after each committed assignment.
    #[arg(long)]
    no_propagate: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = SolverConfig {
        propagate_after_commit: !cli.no_propagate,
        ..SolverConfig::default()
    };

    let source = JsonEventFile::new(&cli.input);
    let sink = JsonPlanWriter::new(cli.output);
    let mut engine = AssignmentEngine::with_config(source, sink, config);

    let report = engine.assign_all(EventId(0))?;

    eprintln!(
        "assigned {}/{} seating units over {} open tables ({} search nodes)",
        report.assigned_units, report.total_units, report.open_tables, report.stats.nodes
    );

    let mut by_table: BTreeMap<u64, Vec<u64>> = BTreeMap::new();
    for p in &report.placements {
        by_table.entry(p.table.0).or_default().push(p.guest.0);
    }
    for (table, guests) in &by_table {
        eprintln!(
            "  table {table}: guests {}",
            guests
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    for line in report.warning_lines() {
        eprintln!("warning: {line}");
    }

    Ok(())
}
