// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Terraform Plan Visualizer
//!
//! Renders the JSON form of a Terraform plan as a classified, diffed report.
//!
//! ## Overview
//!
//! Every resource in the plan is classified by the action Terraform will take
//! on it, and each classification gets a detail view:
//!
//! - Creates list the planned state and the fields known only after apply
//! - Deletes list the prior state
//! - Updates show only the fields that differ, before and after side by side
//! - A create whose address was deleted out of band (drift) becomes a replace
//!
//! ## Architecture
//!
//! 1. **Document**: `resource_changes` and `resource_drift` are read leniently
//! 2. **Reconciler**: plan changes are cross-referenced with drift by address
//! 3. **Formatter**: each classified change gets its detail fragment
//! 4. **Report**: entries and totals are rendered as HTML, text or JSON
//!
//! ## Modules
//!
//! - [`plan`]: Plan document model and untyped attribute values
//! - [`planner`]: Structural equality, field diff, value normalization, formatting
//! - [`reconciler`]: Drift/replace reconciliation
//! - [`report`]: Report construction and the HTML page
//! - [`config`]: Report configuration loading and validation
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```
//! use tfplan_visualizer::{PlanDocument, ReportBuilder, ReportConfig};
//!
//! let document = PlanDocument::parse_str(
//!     r#"{"resource_changes": [{"address": "aws_instance.web",
//!         "change": {"actions": ["update"],
//!                    "before": {"ami": "ami-1"}, "after": {"ami": "ami-2"}}}]}"#,
//! )?;
//! let report = ReportBuilder::new(&ReportConfig::default()).build(&document);
//!
//! assert_eq!(report.summary.update, 1);
//! assert!(report.entries[0].detail.contains("ami-2"));
//! # Ok::<(), tfplan_visualizer::VisualizerError>(())
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod plan;
pub mod planner;
pub mod reconciler;
pub mod report;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, OutputFormatter};
pub use config::{ConfigParser, ConfigValidator, ReportConfig};
pub use error::{Result, VisualizerError};
pub use plan::{AttrValue, ChangeAction, ChangeRecord, PlanDocument};
pub use planner::{ChangeFormatter, DiffEngine, ValueNormalizer, values_equal};
pub use reconciler::{ClassifiedChange, ReconciliationResult, Reconciler, ResolvedAction};
pub use report::{HtmlRenderer, Report, ReportBuilder};
