#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod image;
pub mod types;

// Engine modules – public so callers can bind the parser to their own
// graphs, frontiers, and analyzers.
pub mod analyzer;
pub mod graph;
pub mod mser;
pub mod raster;
pub mod tree;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{DetectError, MserDetector};
pub use crate::mser::{ComponentStats, MserAnalyzer, MserParams};
pub use crate::types::MserResult;

// Structured run reports.
pub use crate::diagnostics::{DetectionDiagnostics, DetectionReport};

// The generic engine, for custom bindings.
pub use crate::tree::ComponentTreeParser;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use mser_detector::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![128u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let detector = MserDetector::new(MserParams::default());
/// let result = detector.process(img).expect("valid input");
/// println!("regions={} latency_ms={:.3}", result.regions.len(), result.latency_ms);
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{MserDetector, MserParams, MserResult};
}
