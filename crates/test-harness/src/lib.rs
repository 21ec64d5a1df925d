//! Test harness for window layout development.
//!
//! Provides programmatic tools for scripting window scenarios through the
//! real host dispatch path, checking invariants after every step, and
//! producing diagnostic output.
//!
//! # Key Components
//!
//! - [`WindowScenario`]: fluent API for building and verifying windows
//! - [`oracle`]: verification functions returning pass/fail verdicts
//! - [`report`]: structured text descriptions of a window
//! - [`svg`]: SVG dump of a drawable list
//! - [`helpers`]: parameter presets and the harness error type
//! - [`assertions`]: assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;
pub mod svg;
pub mod workflow;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::WindowReport;
pub use workflow::WindowScenario;
