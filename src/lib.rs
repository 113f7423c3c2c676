//! # Skyline-RS: Program Model & Metrics Engine
//!
//! The analysis core behind the Skyline 3D code-city visualization. Skyline
//! consumes parse results from an external language front-end and turns them
//! into a fully cross-referenced program model plus a per-entity metric map:
//!
//! - **Program Model**: packages, classes, methods, fields, and locals linked
//!   by symmetric relationship edges (inheritance, calls, accesses, coupling)
//! - **Three-Pass Analysis**: structural building, cross-reference resolution,
//!   and metric derivation, with the pass ordering enforced by the type system
//! - **Software Metrics**: size, inheritance, complexity, cohesion, and
//!   coupling metrics (LOC, DIT, NOC, RFC, CBO, LCOM, WMC, cyclomatic)
//! - **Deterministic Export**: lexicographically ordered snapshots usable as a
//!   join surface for external serializers and renderers
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          API Layer                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Frontend   │  Builder    │  Resolver     │  Metrics │  I/O  │
//! │  contract   │             │               │          │       │
//! │ • units     │ • pass 1    │ • pass 2      │ • pass 3 │ • snapshot
//! │ • bindings  │ • structure │ • cross-refs  │ • rollups│       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use skyline_rs::{AnalysisConfig, SkylineEngine};
//! use skyline_rs::frontend::CompilationUnit;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let units: Vec<CompilationUnit> = obtain_units_from_front_end();
//!     let engine = SkylineEngine::new(AnalysisConfig::default())?;
//!     let results = engine.analyze(&units)?;
//!
//!     println!("{} classes analyzed", results.summary.classes);
//!     Ok(())
//! }
//! # fn obtain_units_from_front_end() -> Vec<skyline_rs::frontend::CompilationUnit> { Vec::new() }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core analysis infrastructure
pub mod core {
    //! Core infrastructure: errors, configuration, session, registry.

    pub mod config;
    pub mod errors;
    pub mod registry;
    pub mod session;
}

// Parser front-end contract
pub mod frontend;

// The program model itself
pub mod model;

// Pass 1: structural model construction
pub mod builder;

// Pass 2: cross-reference resolution
pub mod resolver;

// Pass 3: metric derivation
pub mod metrics;

// Export snapshots for serialization collaborators
pub mod io {
    //! Deterministic export surface for serialization collaborators.

    pub mod export;
}

// Public API and engine interface
pub mod api {
    //! High-level API and engine interface.

    pub mod engine;
    pub mod results;
}

// Re-export primary types for convenience
pub use api::engine::SkylineEngine;
pub use api::results::{AnalysisResults, AnalysisSummary};
pub use core::config::AnalysisConfig;
pub use core::errors::{Result, SkylineError};
pub use core::session::AnalysisSession;
pub use metrics::report::MetricsReport;
pub use model::phases::{ResolvedModel, StructuralModel};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build-time feature detection
pub mod features {
    //! Runtime feature detection.

    /// Check if parallel metric derivation is enabled
    pub const fn has_parallel() -> bool {
        cfg!(feature = "parallel")
    }
}
