use serde::Serialize;

use crate::mser::ComponentStats;

/// Final output of one detector invocation.
///
/// `regions` is ordered by emission, which is deterministic for a given
/// image and parameter set.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MserResult {
    pub regions: Vec<ComponentStats>,
    pub latency_ms: f64,
}
