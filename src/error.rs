// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Error type for an assignment run.
//!
//! Only configuration-fatal conditions abort a run; everything else becomes
//! a [`crate::warnings::Warning`] in the returned report.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    /// A single guest needs more seats than any table offers. No assignment
    /// can ever seat this guest, so the run aborts instead of silently
    /// dropping them.
    #[error("guest {name} requires {seats} seats but the largest table holds {max}")]
    GuestExceedsCapacity { name: String, seats: u32, max: u32 },

    /// A collaborator (data provider or result sink) failed.
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}
