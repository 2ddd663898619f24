#![warn(missing_docs)]

//! Shotline comparison engine.
//!
//! Given a recorded shotline and a regenerated one for the same ray,
//! this crate decides whether they are equivalent within configurable
//! tolerances and, when they are not, produces an itemized report of
//! every difference.
//!
//! # Architecture
//!
//! - [`walk_transitions`] - merges the two sides' segment boundaries
//!   into one ordered stream of transition events
//! - [`reconcile`] - pairs up comparable segments using the events as
//!   cut points, tolerating boundaries that exist on only one side
//! - [`diff_segment_pair`] - type-aware field comparison of one pair
//! - [`CompareSettings`] - tolerances and report toggles
//! - [`render_report`] - deterministic text rendering
//! - [`Session`] - the clear / load / run / report / settings driver
//!
//! # Example
//!
//! ```ignore
//! use shotcmp_engine::Session;
//! use shotcmp_trace::ReplayTracer;
//!
//! let mut session = Session::new();
//! session.load_path("baseline.shot")?;
//! let tracer = ReplayTracer::from_path("candidate.shot")?;
//! session.run(&tracer)?;
//! println!("{}", session.report()?);
//! ```

mod diff;
mod error;
mod reconcile;
mod report;
mod session;
mod settings;
mod transition;

pub use diff::diff_segment_pair;
pub use error::{CompareError, Result};
pub use reconcile::{reconcile, ReconciledPair};
pub use report::render_report;
pub use session::{compare_shot, RunSummary, Session};
pub use settings::{CompareSettings, SettingValue};
pub use transition::{walk_transitions, Transition, TransitionKind, TransitionOrigin};
