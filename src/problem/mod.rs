//! Problem generator for the Kelvin-Helmholtz instability.
//!
//! Three configurations:
//! - slip surface with random perturbations,
//! - tanh interface with a single-mode perturbation (Ryu & Jones style),
//! - periodic double shear layer, a combination of the first two, with
//!   on-the-fly interface diagnostics.

pub mod diagnostics;
mod history;
mod params;
mod ran2;

pub use diagnostics::{interface_report, DiagnosticsError, InterfaceReport};
pub use history::{enroll_problem_history, HistFun, HistoryRegistry};
pub use params::{Iprob, ProblemParams};
pub use ran2::Ran2;

use std::f64::consts::PI;

use crate::config::Config;
use crate::grid::Grid;
use crate::physics::PhysicsState;

/// Per-cell named-scalar extraction for generic output machinery.
pub type CellExpr = fn(&Grid, usize, usize, usize) -> f64;

/// Populate every cell of the grid for the selected configuration.
pub fn init(grid: &mut Grid, params: &ProblemParams) {
    match params.iprob {
        Iprob::SlipSurface => init_slip_surface(grid, params),
        Iprob::SingleMode => init_single_mode(grid, params),
        Iprob::DoubleShear => init_double_shear(grid, params),
    }
}

/// Full setup sequence for the host: initialize the field, hand the
/// diffusion coefficients to the physics state, enroll history variables.
/// Restart reload re-runs `physics.apply` with the same configuration.
pub fn setup(
    grid: &mut Grid,
    cfg: &Config,
    physics: &mut PhysicsState,
    registry: &mut HistoryRegistry,
) -> ProblemParams {
    let params = cfg.problem.params();
    init(grid, &params);
    physics.apply(&cfg.diffusion);
    enroll_problem_history(registry, grid);
    params
}

/// Per-step lifecycle hook: run the interface diagnostics when the double
/// shear layer is active, otherwise a no-op.
pub fn work_in_loop(grid: &Grid, params: &ProblemParams) -> Result<(), DiagnosticsError> {
    if let Some(r) = interface_report(grid, params)? {
        log::info!(
            "scalar dispersion, width = {:13.5e} {:13.5e} {:13.5e}",
            r.dispersion,
            r.mixing_width,
            r.shear_width
        );
    }
    Ok(())
}

/// Shutdown lifecycle hook; nothing to finalize for this problem.
pub fn work_after_loop() {}

/// Look up a named per-cell scalar. `"color"` is the scalar concentration
/// per unit mass, the tracer the diagnostics are built on.
pub fn user_expr(name: &str) -> Option<CellExpr> {
    match name {
        "color" => Some(color),
        _ => None,
    }
}

fn color(g: &Grid, i: usize, j: usize, k: usize) -> f64 {
    let ii = g.idx(i, j, k);
    g.s.as_ref().map_or(0.0, |s| s[ii] / g.d[ii])
}

/// Two uniform streams at +/- vflow separated by slip surfaces at
/// |x2| = 0.25, with uniform random noise breaking the symmetry. The draw
/// order matches the legacy setup: two deviates per cell, two more for
/// cells in the dense inner band.
fn init_slip_surface(grid: &mut Grid, p: &ProblemParams) {
    let mut rng = Ran2::new(p.iseed);
    for k in 0..grid.nx3 {
        for j in 0..grid.nx2 {
            for i in 0..grid.nx1 {
                let ii = grid.idx(i, j, k);
                let (_x1, x2, _x3) = grid.cc_pos(i, j, k);
                grid.d[ii] = 1.0;
                grid.m1[ii] = p.vflow + p.amp * (rng.next() - 0.5);
                grid.m2[ii] = p.amp * (rng.next() - 0.5);
                grid.m3[ii] = 0.0;
                if x2.abs() < 0.25 {
                    grid.d[ii] = p.drat;
                    grid.m1[ii] = -p.drat * (p.vflow + p.amp * (rng.next() - 0.5));
                    grid.m2[ii] = p.drat * p.amp * (rng.next() - 0.5);
                }
                // Pressure scaled to give a sound speed of 1 with gamma = 1.4
                finish_cell(grid, i, j, k, 2.5, p);
            }
            seal_outer_face(grid, j, k, p);
        }
    }
}

/// Single tanh shear layer at x2 = 0 with a single-mode transverse
/// perturbation; uniform density, so the passive scalar tags fluid origin.
fn init_single_mode(grid: &mut Grid, p: &ProblemParams) {
    // Fixed interface scales for this variant, overriding the configuration.
    let a = 0.05;
    let sigma = 0.2;
    for k in 0..grid.nx3 {
        for j in 0..grid.nx2 {
            for i in 0..grid.nx1 {
                let ii = grid.idx(i, j, k);
                let (x1, x2, _x3) = grid.cc_pos(i, j, k);
                grid.d[ii] = 1.0;
                grid.m1[ii] = p.vflow * (x2 / a).tanh();
                grid.m2[ii] = p.amp * (2.0 * PI * x1).sin() * (-(x2 * x2) / (sigma * sigma)).exp();
                grid.m3[ii] = 0.0;
                finish_cell(grid, i, j, k, 1.0, p);
                if let Some(s) = grid.s.as_mut() {
                    s[ii] = if x2 > 0.0 { 1.0 } else { 0.0 };
                }
            }
            seal_outer_face(grid, j, k, p);
        }
    }
}

/// Periodic double shear layer: tanh interfaces at |x2| = 0.5 with a dense
/// inner band. Both momentum components scale with drat inside the band,
/// with no sign flip.
fn init_double_shear(grid: &mut Grid, p: &ProblemParams) {
    let a = p.width;
    for k in 0..grid.nx3 {
        for j in 0..grid.nx2 {
            for i in 0..grid.nx1 {
                let ii = grid.idx(i, j, k);
                let (x1, x2, _x3) = grid.cc_pos(i, j, k);
                let off = x2.abs() - 0.5;
                grid.d[ii] = 1.0;
                grid.m1[ii] = p.vflow * (off / a).tanh();
                grid.m2[ii] =
                    p.amp * (2.0 * PI * x1).sin() * (-(off * off) / (p.sigma * p.sigma)).exp();
                grid.m3[ii] = 0.0;
                if x2.abs() < 0.5 {
                    grid.d[ii] = p.drat;
                    grid.m1[ii] *= p.drat;
                    grid.m2[ii] *= p.drat;
                }
                // Pressure scaled to give a sound speed of 1 with gamma = 1.4
                finish_cell(grid, i, j, k, 2.5, p);
                if let Some(s) = grid.s.as_mut() {
                    s[ii] = if x2.abs() < 0.5 { 1.0 } else { 0.0 };
                }
            }
            seal_outer_face(grid, j, k, p);
        }
    }
}

/// Store the uniform streamwise field and the total energy for one cell.
/// `pbase` is the thermal baseline; E = pbase/(gamma-1) + kinetic (+ field).
fn finish_cell(grid: &mut Grid, i: usize, j: usize, k: usize, pbase: f64, p: &ProblemParams) {
    let ii = grid.idx(i, j, k);
    let ke = 0.5
        * (grid.m1[ii] * grid.m1[ii] + grid.m2[ii] * grid.m2[ii] + grid.m3[ii] * grid.m3[ii])
        / grid.d[ii];
    let mut etot = pbase / (p.gamma - 1.0) + ke;
    if grid.b1c.is_some() {
        let fi = grid.idx_b1i(i, j, k);
        if let Some(b1i) = grid.b1i.as_mut() {
            b1i[fi] = p.b0;
        }
        if let Some(b1c) = grid.b1c.as_mut() {
            b1c[ii] = p.b0;
        }
        etot += 0.5 * p.b0 * p.b0;
    }
    if let Some(e) = grid.e.as_mut() {
        e[ii] = etot;
    }
}

/// Set the face field on the outer i-boundary to match the interior, keeping
/// the stored field divergence-consistent.
fn seal_outer_face(grid: &mut Grid, j: usize, k: usize, p: &ProblemParams) {
    let fi = grid.idx_b1i(grid.nx1, j, k);
    if let Some(b1i) = grid.b1i.as_mut() {
        b1i[fi] = p.b0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Domain;

    fn double_shear_domain() -> Domain {
        Domain { x2min: -1.0, x2max: 1.0, ..Domain::default() }
    }

    #[test]
    fn test_slip_surface_bands() {
        let mut grid = Grid::new(16, 32, 1, Domain::default());
        let p = ProblemParams::default_slip_surface();
        init(&mut grid, &p);
        for j in 0..grid.nx2 {
            for i in 0..grid.nx1 {
                let ii = grid.idx(i, j, 0);
                let (_x1, x2, _x3) = grid.cc_pos(i, j, 0);
                if x2.abs() < 0.25 {
                    assert_eq!(grid.d[ii], p.drat, "inner density at j={}", j);
                    assert!(grid.m1[ii] < 0.0, "inner stream flows backward");
                } else {
                    assert_eq!(grid.d[ii], 1.0, "outer density at j={}", j);
                    assert!(
                        (grid.m1[ii] - p.vflow).abs() <= 0.5 * p.amp,
                        "noise bounded by amp/2, m1={}",
                        grid.m1[ii]
                    );
                }
                assert!((grid.m2[ii]).abs() <= p.drat * 0.5 * p.amp);
                assert_eq!(grid.m3[ii], 0.0);
            }
        }
    }

    #[test]
    fn test_slip_surface_energy() {
        let mut grid = Grid::new(8, 16, 1, Domain::default());
        let p = ProblemParams::default_slip_surface();
        init(&mut grid, &p);
        let e = grid.e.as_ref().unwrap();
        for ii in 0..grid.ncells() {
            let ke = 0.5
                * (grid.m1[ii] * grid.m1[ii] + grid.m2[ii] * grid.m2[ii])
                / grid.d[ii];
            let expected = 2.5 / (p.gamma - 1.0) + ke;
            assert!((e[ii] - expected).abs() < 1e-12, "E mismatch at {}", ii);
        }
    }

    #[test]
    fn test_slip_surface_deterministic() {
        let p = ProblemParams::default_slip_surface();
        let mut a = Grid::new(16, 16, 1, Domain::default());
        let mut b = Grid::new(16, 16, 1, Domain::default());
        init(&mut a, &p);
        init(&mut b, &p);
        assert_eq!(a.m1, b.m1);
        assert_eq!(a.m2, b.m2);
    }

    #[test]
    fn test_slip_surface_seed_changes_noise() {
        let mut a = Grid::new(16, 16, 1, Domain::default());
        let mut b = Grid::new(16, 16, 1, Domain::default());
        init(&mut a, &ProblemParams::default_slip_surface());
        init(
            &mut b,
            &ProblemParams { iseed: -99, ..ProblemParams::default_slip_surface() },
        );
        assert_ne!(a.m1, b.m1);
    }

    #[test]
    fn test_slip_surface_barotropic_has_no_energy() {
        let mut grid = Grid::new(8, 8, 1, Domain::default()).barotropic();
        init(&mut grid, &ProblemParams::default_slip_surface());
        assert!(grid.e.is_none());
        assert!(grid.d.iter().all(|&d| d > 0.0));
    }

    #[test]
    fn test_single_mode_profile() {
        let mut grid = Grid::new(16, 16, 1, Domain::default());
        let p = ProblemParams::default_single_mode();
        init(&mut grid, &p);
        let s = grid.s.as_ref().unwrap();
        let e = grid.e.as_ref().unwrap();
        for j in 0..grid.nx2 {
            for i in 0..grid.nx1 {
                let ii = grid.idx(i, j, 0);
                let (x1, x2, _x3) = grid.cc_pos(i, j, 0);
                assert_eq!(grid.d[ii], 1.0);
                let m1 = p.vflow * (x2 / 0.05).tanh();
                assert!((grid.m1[ii] - m1).abs() < 1e-14);
                let m2 = p.amp * (2.0 * PI * x1).sin() * (-(x2 * x2) / 0.04).exp();
                assert!((grid.m2[ii] - m2).abs() < 1e-14);
                assert_eq!(s[ii], if x2 > 0.0 { 1.0 } else { 0.0 });
                let ke = 0.5 * (m1 * m1 + m2 * m2);
                assert!((e[ii] - (1.0 / (p.gamma - 1.0) + ke)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_single_mode_midline_at_rest() {
        // Odd row count puts one row of centers exactly on x2 = 0.
        let mut grid = Grid::new(8, 5, 1, Domain::default());
        init(&mut grid, &ProblemParams::default_single_mode());
        let j_mid = 2;
        for i in 0..grid.nx1 {
            let ii = grid.idx(i, j_mid, 0);
            assert_eq!(grid.m1[ii], 0.0, "tanh(0) stream at rest");
            assert_eq!(grid.s.as_ref().unwrap()[ii], 0.0, "x2 <= 0 untagged");
        }
    }

    #[test]
    fn test_double_shear_bands() {
        let mut grid = Grid::new(16, 64, 1, double_shear_domain());
        let p = ProblemParams::default_double_shear();
        init(&mut grid, &p);
        let s = grid.s.as_ref().unwrap();
        for j in 0..grid.nx2 {
            for i in 0..grid.nx1 {
                let ii = grid.idx(i, j, 0);
                let (_x1, x2, _x3) = grid.cc_pos(i, j, 0);
                let inner = x2.abs() < 0.5;
                assert_eq!(grid.d[ii], if inner { p.drat } else { 1.0 });
                assert_eq!(s[ii], if inner { 1.0 } else { 0.0 });
                // Velocity (not momentum) follows the same tanh on both
                // sides of each interface: drat scales momentum, not v.
                let v = p.vflow * ((x2.abs() - 0.5) / p.width).tanh();
                assert!((grid.m1[ii] / grid.d[ii] - v).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn test_double_shear_energy_with_field() {
        let mut grid = Grid::new(8, 16, 1, double_shear_domain()).with_mhd();
        let p = ProblemParams { b0: 0.2, ..ProblemParams::default_double_shear() };
        init(&mut grid, &p);
        let e = grid.e.as_ref().unwrap();
        for ii in 0..grid.ncells() {
            let ke = 0.5
                * (grid.m1[ii] * grid.m1[ii] + grid.m2[ii] * grid.m2[ii])
                / grid.d[ii];
            let expected = 2.5 / (p.gamma - 1.0) + ke + 0.5 * p.b0 * p.b0;
            assert!((e[ii] - expected).abs() < 1e-12, "E mismatch at {}", ii);
        }
    }

    #[test]
    fn test_uniform_field_including_outer_face() {
        for params in [
            ProblemParams::default_slip_surface(),
            ProblemParams::default_single_mode(),
            ProblemParams::default_double_shear(),
        ] {
            let mut grid = Grid::new(8, 8, 1, Domain::default()).with_mhd();
            let p = ProblemParams { b0: 0.3, ..params };
            init(&mut grid, &p);
            let b1i = grid.b1i.as_ref().unwrap();
            assert!(
                b1i.iter().all(|&b| b == p.b0),
                "every face, outer boundary included, carries b0"
            );
            let b1c = grid.b1c.as_ref().unwrap();
            assert!(b1c.iter().all(|&b| b == p.b0));
        }
    }

    #[test]
    fn test_user_expr_color() {
        let mut grid = Grid::new(4, 4, 1, double_shear_domain());
        init(&mut grid, &ProblemParams::default_double_shear());
        let color = user_expr("color").expect("color is registered");
        for j in 0..grid.nx2 {
            let ii = grid.idx(0, j, 0);
            let expected = grid.s.as_ref().unwrap()[ii] / grid.d[ii];
            assert_eq!(color(&grid, 0, j, 0), expected);
        }
        assert!(user_expr("vorticity").is_none());
    }

    #[test]
    fn test_setup_sequence() {
        let mut grid = Grid::new(8, 16, 1, double_shear_domain()).with_mhd();
        let cfg = Config::default();
        let mut physics = PhysicsState::default();
        let mut registry = HistoryRegistry::new();
        let params = setup(&mut grid, &cfg, &mut physics, &mut registry);
        assert_eq!(params.iprob, Iprob::DoubleShear);
        assert_eq!(physics.eta_ohm, cfg.diffusion.eta_ohm);
        assert_eq!(registry.len(), 3);
        assert!(grid.d.iter().all(|&d| d > 0.0));

        // A second setup call (one per subdomain) must not double-enroll.
        let mut grid2 = Grid::new(8, 16, 1, double_shear_domain()).with_mhd();
        setup(&mut grid2, &cfg, &mut physics, &mut registry);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_work_in_loop_reports_for_double_shear() {
        let mut grid = Grid::new(8, 128, 1, double_shear_domain());
        let p = ProblemParams { amp: 0.0, ..ProblemParams::default_double_shear() };
        init(&mut grid, &p);
        work_in_loop(&grid, &p).unwrap();
    }

    #[test]
    fn test_work_in_loop_noop_for_other_variants() {
        let mut grid = Grid::new(8, 8, 3, Domain::default());
        let p = ProblemParams::default_single_mode();
        init(&mut grid, &p);
        // Even a 3d grid passes: the diagnostics never run for this variant.
        work_in_loop(&grid, &p).unwrap();
    }
}
