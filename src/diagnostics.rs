//! Structured run reports for tools and tests.

use serde::Serialize;

use crate::image::ImageU8;
use crate::types::MserResult;

/// Shape and brightness summary of the processed input.
#[derive(Clone, Debug, Serialize)]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub mean_intensity: f32,
}

impl InputDescriptor {
    pub fn of(image: &ImageU8<'_>) -> Self {
        let mut sum = 0u64;
        for row in image.rows() {
            sum += row.iter().map(|&p| u64::from(p)).sum::<u64>();
        }
        let count = (image.w * image.h).max(1) as f32;
        Self {
            width: image.w,
            height: image.h,
            mean_intensity: sum as f32 / count,
        }
    }
}

/// Counters describing how much work one parse performed.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DetectionDiagnostics {
    pub nodes_visited: u64,
    pub components_opened: usize,
    pub components_merged: usize,
    pub regions_emitted: usize,
    pub elapsed_ms: f64,
}

/// Detector result plus the structured trace of the run.
#[derive(Clone, Debug, Serialize)]
pub struct DetectionReport {
    pub input: InputDescriptor,
    pub result: MserResult,
    pub diagnostics: DetectionDiagnostics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_descriptor_averages_intensity() {
        let data = vec![10u8, 20, 30, 40];
        let img = ImageU8::from_slice(&data, 2, 2);
        let descriptor = InputDescriptor::of(&img);
        assert_eq!(descriptor.width, 2);
        assert_eq!(descriptor.height, 2);
        assert!((descriptor.mean_intensity - 25.0).abs() < 1e-6);
    }
}
