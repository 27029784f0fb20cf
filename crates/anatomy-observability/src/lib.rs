// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # anatomy-observability
//!
//! Logging setup shared by the anatomy crates, with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: JSON log files in a per-run folder (desktop only)

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known crate names for debug flags (also the tracing targets they log under)
pub const KNOWN_CRATES: &[&str] = &[
    "anatomy",
    "anatomy-config",
    "anatomy-hierarchy",
    "anatomy-layout",
];
