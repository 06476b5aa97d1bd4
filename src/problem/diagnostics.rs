// On-the-fly interface analysis for the double shear layer: reduce the 2D
// state to symmetrized transverse profiles and pull out sub-cell interface
// positions by threshold interpolation. 2D only; the profile reduction has
// no meaning across k-slabs.

use thiserror::Error;

use super::params::{Iprob, ProblemParams};
use crate::grid::Grid;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DiagnosticsError {
    #[error("interface analysis does not support 3d grids")]
    ThreeDUnsupported,
    #[error("grid carries no passive scalar to trace fluid origin")]
    MissingScalar,
    #[error("need at least 4 transverse rows for profiles, got {0}")]
    TooFewRows(usize),
    #[error("scalar profile sums to zero; nothing to normalize against")]
    FlatProfile,
    #[error("{profile} profile never brackets {threshold}")]
    ThresholdNotBracketed { profile: &'static str, threshold: f64 },
    #[error("{profile} profile bracket at {threshold} has zero slope")]
    DegenerateBracket { profile: &'static str, threshold: f64 },
}

/// Scalar measures of instability growth extracted from one snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterfaceReport {
    /// RMS transverse spread of the scalar-tagged fluid, sqrt(sum x2^2 s / sum s).
    pub dispersion: f64,
    /// |x2| where the normalized cumulative concentration profile crosses 0.5.
    pub mixing_width: f64,
    /// Span between the two crossings of +/- 0.9 vflow in the velocity profile.
    pub shear_width: f64,
}

/// Analyze the current snapshot. `Ok(None)` for configurations other than the
/// double shear layer; all profile hazards (flat, unbracketed, zero-slope)
/// surface as errors instead of the reference's unguarded arithmetic.
pub fn interface_report(
    grid: &Grid,
    params: &ProblemParams,
) -> Result<Option<InterfaceReport>, DiagnosticsError> {
    if params.iprob != Iprob::DoubleShear {
        return Ok(None);
    }
    if grid.is_3d() {
        return Err(DiagnosticsError::ThreeDUnsupported);
    }
    let s = grid.s.as_ref().ok_or(DiagnosticsError::MissingScalar)?;

    let nx = grid.nx1;
    let ny = grid.nx2;
    let half = ny / 2;
    if half < 2 {
        return Err(DiagnosticsError::TooFewRows(ny));
    }

    // Row means of concentration and streamwise velocity, plus the domain
    // totals feeding the dispersion measure.
    let mut sprof = vec![0.0; ny];
    let mut vprof = vec![0.0; ny];
    let mut disp_sum = 0.0;
    let mut weight = 0.0;
    for j in 0..ny {
        for i in 0..nx {
            let ii = grid.idx(i, j, 0);
            let (_x1, x2, _x3) = grid.cc_pos(i, j, 0);
            disp_sum += x2 * x2 * s[ii];
            weight += s[ii];
            sprof[j] += s[ii];
            vprof[j] += grid.m1[ii] / grid.d[ii];
        }
        sprof[j] /= nx as f64;
        vprof[j] /= nx as f64;
    }

    // Cumulate the concentration from both edges toward the midline, then
    // fold each profile onto its mirror row.
    for j in 1..half {
        sprof[j] += sprof[j - 1];
        sprof[ny - 1 - j] += sprof[ny - j];
    }
    for j in 0..half {
        sprof[j] = 0.5 * (sprof[j] + sprof[ny - 1 - j]);
        vprof[j] = 0.5 * (vprof[j] + vprof[ny - 1 - j]);
    }

    let norm = sprof[half - 1];
    if !(norm > 0.0) || !(weight > 0.0) {
        return Err(DiagnosticsError::FlatProfile);
    }
    for v in sprof[..half].iter_mut() {
        *v /= norm;
    }

    let x2: Vec<f64> = (0..half).map(|j| grid.cc_pos(0, j, 0).1).collect();

    // Mixing width: median of the tagged fluid column.
    let mixing_width = rising_cross(&sprof[..half], &x2, 0.5, "scalar")?.abs();

    // Shear width: span between the fall through +0.9 vflow and the fall
    // through -0.9 vflow.
    let (j_hi, pos_hi) = falling_cross(&vprof[..half], &x2, 0, 0.9 * params.vflow, "velocity")?;
    let (_, pos_lo) = falling_cross(&vprof[..half], &x2, j_hi, -0.9 * params.vflow, "velocity")?;
    let shear_width = (pos_lo - pos_hi).abs();

    let dispersion = (disp_sum / weight).sqrt();

    Ok(Some(InterfaceReport { dispersion, mixing_width, shear_width }))
}

/// Linear interpolation of the crossing position between two bracketing rows.
fn lerp_cross(
    x_lo: f64,
    x_hi: f64,
    f_lo: f64,
    f_hi: f64,
    target: f64,
    profile: &'static str,
) -> Result<f64, DiagnosticsError> {
    let denom = f_hi - f_lo;
    if denom == 0.0 {
        return Err(DiagnosticsError::DegenerateBracket { profile, threshold: target });
    }
    Ok(x_lo * (f_hi - target) / denom + x_hi * (target - f_lo) / denom)
}

/// First crossing of a monotonically scanned rising profile through `target`.
fn rising_cross(
    prof: &[f64],
    x2: &[f64],
    target: f64,
    profile: &'static str,
) -> Result<f64, DiagnosticsError> {
    let mut j = 0;
    while j < prof.len() && prof[j] < target {
        j += 1;
    }
    if j == 0 || j >= prof.len() {
        return Err(DiagnosticsError::ThresholdNotBracketed { profile, threshold: target });
    }
    lerp_cross(x2[j - 1], x2[j], prof[j - 1], prof[j], target, profile)
}

/// First fall through `target` at or after `start`; returns the index after
/// the crossing along with the interpolated position.
fn falling_cross(
    prof: &[f64],
    x2: &[f64],
    start: usize,
    target: f64,
    profile: &'static str,
) -> Result<(usize, f64), DiagnosticsError> {
    let mut j = start;
    while j < prof.len() && prof[j] > target {
        j += 1;
    }
    if j == 0 || j >= prof.len() {
        return Err(DiagnosticsError::ThresholdNotBracketed { profile, threshold: target });
    }
    let pos = lerp_cross(x2[j - 1], x2[j], prof[j - 1], prof[j], target, profile)?;
    Ok((j, pos))
}
