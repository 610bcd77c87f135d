//! Maximally stable extremal regions, grown on top of the component-tree
//! parser.
//!
//! The analyzer keeps every open component in an arena and, for each one, a
//! bounded history of statistics snapshots, one per unit grey level between
//! the component's birth level and its current level. Each unit step scores
//! the newest snapshot with `delta * N_old / (N_new - N_old)` (large means
//! stable; zero growth over `delta` levels scores infinite) and emits the
//! second-newest snapshot when it is a stability peak within the configured
//! area and stability bounds.

use serde::{Deserialize, Serialize};

use crate::analyzer::ComponentAnalyzer;
use crate::raster::PixelIndex;

mod stats;

pub use self::stats::ComponentStats;

/// Detection parameters with the reference defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MserParams {
    /// Smallest region area (pixels) eligible for emission.
    pub min_area: u64,
    /// Largest region area (pixels) eligible for emission.
    pub max_area: u64,
    /// Grey-level gap used by the stability score.
    pub delta: u8,
    /// Emission floor for the stability score.
    pub min_stability: f32,
    /// Extract bright-on-dark regions instead of dark-on-bright.
    pub inverted: bool,
}

impl Default for MserParams {
    fn default() -> Self {
        Self {
            min_area: 200,
            max_area: 14400,
            delta: 5,
            min_stability: 20.0,
            inverted: false,
        }
    }
}

/// Handle into the analyzer's component arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentId(usize);

struct Component {
    level: i32,
    stats: ComponentStats,
    history: Vec<ComponentStats>,
    merged: bool,
}

/// Everything the analyzer accumulated over one parse.
#[derive(Clone, Debug)]
pub struct MserOutcome {
    pub regions: Vec<ComponentStats>,
    pub nodes_visited: u64,
    pub components_opened: usize,
    pub components_merged: usize,
}

/// Accumulates per-component statistics and emits maximally stable regions.
pub struct MserAnalyzer {
    components: Vec<Component>,
    regions: Vec<ComponentStats>,
    params: MserParams,
    nodes_visited: u64,
    components_opened: usize,
    components_merged: usize,
}

impl MserAnalyzer {
    pub fn new(params: MserParams) -> Self {
        Self {
            components: Vec::with_capacity(32),
            regions: Vec::new(),
            params,
            nodes_visited: 0,
            components_opened: 0,
            components_merged: 0,
        }
    }

    fn component(&self, id: ComponentId) -> &Component {
        let comp = &self.components[id.0];
        debug_assert!(!comp.merged, "access to a merged component");
        comp
    }

    fn open(&mut self, level: i32, stats: ComponentStats) -> ComponentId {
        self.components.push(Component {
            level,
            stats,
            history: Vec::new(),
            merged: false,
        });
        ComponentId(self.components.len() - 1)
    }

    /// True when `a` lies past `b` in flood order.
    #[inline]
    fn outranks(&self, a: i32, b: i32) -> bool {
        if self.params.inverted {
            a < b
        } else {
            a > b
        }
    }

    /// Walks the component one unit of level at a time until it reaches
    /// `target`. Each step snapshots the pre-absorption statistics, scores
    /// the snapshot, and tests the previous one for emission.
    fn advance(&mut self, id: ComponentId, target: i32) {
        let step = if self.params.inverted { -1 } else { 1 };
        let Self {
            components,
            regions,
            params,
            ..
        } = self;
        let comp = &mut components[id.0];
        debug_assert!(!comp.merged);
        while comp.level != target {
            let mut snapshot = comp.stats.clone();
            snapshot.age = age_of(comp.level);
            snapshot.stability = stability_at(&comp.history, snapshot.n, params.delta);
            comp.history.push(snapshot);
            emit_if_stable(&comp.history, params, regions);
            comp.level += step;
        }
    }

    #[cfg(test)]
    fn history(&self, id: ComponentId) -> &[ComponentStats] {
        &self.components[id.0].history
    }
}

impl ComponentAnalyzer for MserAnalyzer {
    type NodeIndex = PixelIndex;
    type Value = i32;
    type ComponentRef = ComponentId;
    type Result = MserOutcome;

    fn new_component(&mut self, level: i32) -> ComponentId {
        self.open(level, ComponentStats::empty())
    }

    fn new_component_at(&mut self, node: PixelIndex, level: i32) -> ComponentId {
        self.nodes_visited += 1;
        self.components_opened += 1;
        let stats = ComponentStats::point(node.x as f32, node.y as f32, age_of(level));
        self.open(level, stats)
    }

    fn add_node(&mut self, node: PixelIndex, level: i32, id: ComponentId) {
        self.nodes_visited += 1;
        if self.outranks(level, self.component(id).level) {
            self.advance(id, level);
        }
        let point = ComponentStats::point(node.x as f32, node.y as f32, age_of(level));
        let delta = self.params.delta;
        let comp = &mut self.components[id.0];
        comp.stats.absorb(&point);
        comp.stats.stability = stability_at(&comp.history, comp.stats.n, delta);
    }

    fn raise_level(&mut self, id: ComponentId, level: i32) {
        if self.outranks(level, self.component(id).level) {
            self.advance(id, level);
        }
    }

    fn merge_into(&mut self, src: ComponentId, dst: ComponentId, level: i32) {
        debug_assert!(dst.0 < src.0, "components merge into older components");
        self.components_merged += 1;

        // Both operands reach the merge level before their statistics are
        // combined, so the absorbed branch still records and tests its last
        // history steps.
        if self.outranks(level, self.component(src).level) {
            self.advance(src, level);
        }
        if self.outranks(level, self.component(dst).level) {
            self.advance(dst, level);
        }

        let delta = self.params.delta;
        let (head, tail) = self.components.split_at_mut(src.0);
        let src_comp = &mut tail[0];
        let dst_comp = &mut head[dst.0];
        debug_assert!(!src_comp.merged && !dst_comp.merged);

        // The history follows the principal branch: whichever operand holds
        // more pixels (ties keep the surviving component's record).
        if src_comp.stats.n > dst_comp.stats.n {
            dst_comp.history = std::mem::take(&mut src_comp.history);
        }
        dst_comp.stats.absorb(&src_comp.stats);
        dst_comp.stats.stability = stability_at(&dst_comp.history, dst_comp.stats.n, delta);

        src_comp.merged = true;
        src_comp.history = Vec::new();
    }

    fn level_of(&self, id: ComponentId) -> i32 {
        self.component(id).level
    }

    fn into_result(self) -> MserOutcome {
        MserOutcome {
            regions: self.regions,
            nodes_visited: self.nodes_visited,
            components_opened: self.components_opened,
            components_merged: self.components_merged,
        }
    }
}

#[inline]
fn age_of(level: i32) -> u8 {
    debug_assert!((0..=255).contains(&level), "level out of range: {level}");
    level as u8
}

/// Stability of the snapshot about to sit at index `history.len()`: the
/// ratio of the area `delta` levels back to the growth since then. With
/// fewer than `delta` prior snapshots the score is zero.
fn stability_at(history: &[ComponentStats], n_new: u64, delta: u8) -> f32 {
    let delta = delta as usize;
    if history.len() < delta {
        return 0.0;
    }
    let n_old = history[history.len() - delta].n;
    (delta as f32 * n_old as f32) / (n_new as f32 - n_old as f32)
}

/// Tests the second-newest snapshot: emitted when its stability beats the
/// predecessor strictly and the successor at least as well (so an exact
/// plateau emits once, at its first snapshot), within the area and
/// stability bounds.
fn emit_if_stable(history: &[ComponentStats], params: &MserParams, regions: &mut Vec<ComponentStats>) {
    if history.len() < 3 {
        return;
    }
    let succ = &history[history.len() - 1];
    let examinee = &history[history.len() - 2];
    let pred = &history[history.len() - 3];

    if examinee.stability > pred.stability
        && examinee.stability >= succ.stability
        && (params.min_area..=params.max_area).contains(&examinee.n)
        && examinee.stability >= params.min_stability
    {
        regions.push(examinee.clone());
    }
}
