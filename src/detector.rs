use log::debug;
use std::fmt;
use std::time::Instant;

use crate::diagnostics::{DetectionDiagnostics, DetectionReport, InputDescriptor};
use crate::image::ImageU8;
use crate::mser::{MserAnalyzer, MserParams};
use crate::raster::{BucketFrontier, RasterAccessor};
use crate::tree::ComponentTreeParser;
use crate::types::MserResult;

/// Rejected inputs and parameter combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectError {
    EmptyImage {
        width: usize,
        height: usize,
    },
    BadStride {
        stride: usize,
        width: usize,
    },
    ShortBuffer {
        needed: usize,
        len: usize,
    },
    ZeroDelta,
    AreaBoundsReversed {
        min_area: u64,
        max_area: u64,
    },
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectError::EmptyImage { width, height } => {
                write!(f, "image has no pixels ({width}x{height})")
            }
            DetectError::BadStride { stride, width } => {
                write!(f, "row stride {stride} shorter than width {width}")
            }
            DetectError::ShortBuffer { needed, len } => {
                write!(f, "pixel buffer holds {len} samples, need {needed}")
            }
            DetectError::ZeroDelta => write!(f, "delta must be at least 1"),
            DetectError::AreaBoundsReversed { min_area, max_area } => {
                write!(f, "min_area {min_area} exceeds max_area {max_area}")
            }
        }
    }
}

impl std::error::Error for DetectError {}

/// MSER detector over 8-bit grayscale images.
///
/// A thin wiring of the component-tree parser with the raster binding and
/// the MSER analyzer; it is a pure function of (image, parameters) and
/// keeps no state between calls.
pub struct MserDetector {
    params: MserParams,
}

impl MserDetector {
    pub fn new(params: MserParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MserParams {
        &self.params
    }

    /// Runs the component-tree parse and returns the stable regions.
    pub fn process(&self, gray: ImageU8<'_>) -> Result<MserResult, DetectError> {
        Ok(self.process_with_diagnostics(gray)?.result)
    }

    /// Like [`MserDetector::process`], additionally returning the structured
    /// run trace.
    pub fn process_with_diagnostics(
        &self,
        gray: ImageU8<'_>,
    ) -> Result<DetectionReport, DetectError> {
        validate(&self.params, &gray)?;
        debug!(
            "MserDetector::process start w={} h={} inverted={} delta={}",
            gray.w, gray.h, self.params.inverted, self.params.delta
        );
        let start = Instant::now();

        let mut graph = RasterAccessor::new(gray.clone());
        let mut frontier = BucketFrontier::new(self.params.inverted);
        let analyzer = MserAnalyzer::new(self.params.clone());
        let parser = ComponentTreeParser::new(self.params.inverted);
        let outcome = parser.parse(&mut graph, &mut frontier, analyzer);

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "MserDetector::process done regions={} nodes={} merges={} latency_ms={:.3}",
            outcome.regions.len(),
            outcome.nodes_visited,
            outcome.components_merged,
            elapsed_ms
        );

        Ok(DetectionReport {
            input: InputDescriptor::of(&gray),
            diagnostics: DetectionDiagnostics {
                nodes_visited: outcome.nodes_visited,
                components_opened: outcome.components_opened,
                components_merged: outcome.components_merged,
                regions_emitted: outcome.regions.len(),
                elapsed_ms,
            },
            result: MserResult {
                regions: outcome.regions,
                latency_ms: elapsed_ms,
            },
        })
    }
}

fn validate(params: &MserParams, gray: &ImageU8<'_>) -> Result<(), DetectError> {
    if gray.w == 0 || gray.h == 0 {
        return Err(DetectError::EmptyImage {
            width: gray.w,
            height: gray.h,
        });
    }
    if gray.stride < gray.w {
        return Err(DetectError::BadStride {
            stride: gray.stride,
            width: gray.w,
        });
    }
    let needed = (gray.h - 1) * gray.stride + gray.w;
    if gray.data.len() < needed {
        return Err(DetectError::ShortBuffer {
            needed,
            len: gray.data.len(),
        });
    }
    if params.delta == 0 {
        return Err(DetectError::ZeroDelta);
    }
    if params.min_area > params.max_area {
        return Err(DetectError::AreaBoundsReversed {
            min_area: params.min_area,
            max_area: params.max_area,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_image() {
        let detector = MserDetector::new(MserParams::default());
        let img = ImageU8 {
            w: 0,
            h: 10,
            stride: 0,
            data: &[],
        };
        assert_eq!(
            detector.process(img).unwrap_err(),
            DetectError::EmptyImage {
                width: 0,
                height: 10
            }
        );
    }

    #[test]
    fn rejects_short_buffer_and_bad_stride() {
        let detector = MserDetector::new(MserParams::default());
        let data = vec![0u8; 10];

        let narrow = ImageU8 {
            w: 4,
            h: 2,
            stride: 2,
            data: &data,
        };
        assert!(matches!(
            detector.process(narrow).unwrap_err(),
            DetectError::BadStride { .. }
        ));

        let short = ImageU8 {
            w: 4,
            h: 4,
            stride: 4,
            data: &data,
        };
        assert_eq!(
            detector.process(short).unwrap_err(),
            DetectError::ShortBuffer { needed: 16, len: 10 }
        );
    }

    #[test]
    fn rejects_degenerate_parameters() {
        let data = vec![0u8; 4];
        let img = ImageU8::from_slice(&data, 2, 2);

        let mut params = MserParams::default();
        params.delta = 0;
        assert_eq!(
            MserDetector::new(params).process(img.clone()).unwrap_err(),
            DetectError::ZeroDelta
        );

        let mut params = MserParams::default();
        params.min_area = 500;
        params.max_area = 100;
        assert_eq!(
            MserDetector::new(params).process(img).unwrap_err(),
            DetectError::AreaBoundsReversed {
                min_area: 500,
                max_area: 100
            }
        );
    }

    #[test]
    fn params_accessor_exposes_configuration() {
        let params = MserParams {
            delta: 9,
            inverted: true,
            ..Default::default()
        };
        let detector = MserDetector::new(params.clone());
        assert_eq!(detector.params(), &params);
    }

    #[test]
    fn single_pixel_image_parses_cleanly() {
        let data = [42u8];
        let img = ImageU8::from_slice(&data, 1, 1);
        let report = MserDetector::new(MserParams::default())
            .process_with_diagnostics(img)
            .unwrap();
        assert!(report.result.regions.is_empty());
        assert_eq!(report.diagnostics.nodes_visited, 1);
        assert_eq!(report.diagnostics.components_opened, 1);
        assert_eq!(report.diagnostics.components_merged, 1);
    }
}
