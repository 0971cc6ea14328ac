// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Concrete collaborators: JSON event files and an in-memory event.
//!
//! [`JsonEventFile`] reads an [`EventSnapshot`] document from disk;
//! [`JsonPlanWriter`] writes the computed plan back as JSON (or to stdout).
//! [`InMemoryEvent`] implements both traits over plain vectors and is what
//! the tests and embedding examples use.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::engine::{AssignmentSink, EventId, GuestSource, Placement};
use crate::model::{Guest, GuestStatus, SeatingTable};

/// On-disk shape of one event: its guests and tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventSnapshot {
    #[serde(default)]
    pub guests: Vec<Guest>,
    #[serde(default)]
    pub tables: Vec<SeatingTable>,
}

/// Read-side collaborator backed by a JSON file. The event id is carried by
/// the file itself, so the id passed to the loader is not interpreted.
#[derive(Debug, Clone)]
pub struct JsonEventFile {
    path: PathBuf,
}

impl JsonEventFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> anyhow::Result<EventSnapshot> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading event snapshot {}", self.path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing event snapshot {}", self.path.display()))
    }
}

impl GuestSource for JsonEventFile {
    fn load_confirmed_guests(&mut self, _event: EventId) -> anyhow::Result<Vec<Guest>> {
        Ok(self
            .read()?
            .guests
            .into_iter()
            .filter(|g| g.status == GuestStatus::Confirmed)
            .collect())
    }

    fn load_tables(&mut self, _event: EventId) -> anyhow::Result<Vec<SeatingTable>> {
        Ok(self.read()?.tables)
    }
}

/// On-disk shape of a computed plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanDocument {
    pub assignments: Vec<Placement>,
}

/// Write-side collaborator producing a JSON plan document. With no output
/// path the document goes to stdout.
#[derive(Debug, Clone)]
pub struct JsonPlanWriter {
    output: Option<PathBuf>,
}

impl JsonPlanWriter {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }
}

impl AssignmentSink for JsonPlanWriter {
    fn clear_assignments(&mut self, _event: EventId) -> anyhow::Result<()> {
        // The plan document is rewritten wholesale on persist.
        Ok(())
    }

    fn persist(&mut self, placements: &[Placement]) -> anyhow::Result<()> {
        let doc = PlanDocument {
            assignments: placements.to_vec(),
        };
        let text = serde_json::to_string_pretty(&doc).context("serializing plan")?;
        match &self.output {
            Some(path) => fs::write(path, text)
                .with_context(|| format!("writing plan to {}", path.display()))?,
            None => println!("{text}"),
        }
        Ok(())
    }
}

/// Both collaborators over in-memory vectors.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEvent {
    pub guests: Vec<Guest>,
    pub tables: Vec<SeatingTable>,
    /// Plan received through [`AssignmentSink::persist`].
    pub assignments: Vec<Placement>,
    /// Times [`AssignmentSink::clear_assignments`] ran.
    pub resets: usize,
}

impl InMemoryEvent {
    pub fn new(guests: Vec<Guest>, tables: Vec<SeatingTable>) -> Self {
        Self {
            guests,
            tables,
            assignments: Vec::new(),
            resets: 0,
        }
    }
}

impl GuestSource for InMemoryEvent {
    fn load_confirmed_guests(&mut self, _event: EventId) -> anyhow::Result<Vec<Guest>> {
        Ok(self
            .guests
            .iter()
            .filter(|g| g.status == GuestStatus::Confirmed)
            .cloned()
            .collect())
    }

    fn load_tables(&mut self, _event: EventId) -> anyhow::Result<Vec<SeatingTable>> {
        Ok(self.tables.clone())
    }
}

impl AssignmentSink for InMemoryEvent {
    fn clear_assignments(&mut self, _event: EventId) -> anyhow::Result<()> {
        self.assignments.clear();
        self.resets += 1;
        Ok(())
    }

    fn persist(&mut self, placements: &[Placement]) -> anyhow::Result<()> {
        self.assignments.extend_from_slice(placements);
        Ok(())
    }
}
