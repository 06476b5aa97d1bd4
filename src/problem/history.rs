// History-variable enrollment. The registry tolerates duplicate names as
// no-ops, so repeated problem setup calls (e.g. one per subdomain) enroll
// each variable exactly once without a call-count flag.

use crate::grid::Grid;

/// Per-cell scalar extraction callback for history dumps.
pub type HistFun = fn(&Grid, usize, usize, usize) -> f64;

#[derive(Default)]
pub struct HistoryRegistry {
    entries: Vec<(String, HistFun)>,
}

impl HistoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a history variable. Returns false (and changes nothing) when
    /// the name is already enrolled.
    pub fn enroll(&mut self, name: &str, fun: HistFun) -> bool {
        if self.entries.iter().any(|(n, _)| n == name) {
            return false;
        }
        self.entries.push((name.to_string(), fun));
        true
    }

    pub fn get(&self, name: &str) -> Option<HistFun> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, f)| *f)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Enroll the problem's extra history variables: cell-centered field
/// components, only meaningful on MHD grids.
pub fn enroll_problem_history(registry: &mut HistoryRegistry, grid: &Grid) {
    if grid.b1c.is_some() {
        registry.enroll("<Bx>", hst_bx);
        registry.enroll("<By>", hst_by);
        registry.enroll("<Bz>", hst_bz);
    }
}

fn hst_bx(g: &Grid, i: usize, j: usize, k: usize) -> f64 {
    g.b1c.as_ref().map_or(0.0, |b| b[g.idx(i, j, k)])
}

fn hst_by(g: &Grid, i: usize, j: usize, k: usize) -> f64 {
    g.b2c.as_ref().map_or(0.0, |b| b[g.idx(i, j, k)])
}

fn hst_bz(g: &Grid, i: usize, j: usize, k: usize) -> f64 {
    g.b3c.as_ref().map_or(0.0, |b| b[g.idx(i, j, k)])
}
