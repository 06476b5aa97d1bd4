/// Which of the three Kelvin-Helmholtz configurations to set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iprob {
    /// Two uniform streams at +/- vflow with random perturbations.
    SlipSurface,
    /// tanh shear layer with a single-mode perturbation (Ryu & Jones style).
    SingleMode,
    /// Periodic double shear layer; the only variant with interface diagnostics.
    DoubleShear,
}

/// Problem parameters for field initialization and diagnostics.
#[derive(Debug, Clone)]
pub struct ProblemParams {
    pub iprob: Iprob,
    /// Flow speed of each stream.
    pub vflow: f64,
    /// Density ratio of the inner band to the outer streams.
    pub drat: f64,
    /// Perturbation amplitude.
    pub amp: f64,
    /// Shear layer thickness (double shear only; single mode fixes a=0.05).
    pub width: f64,
    /// Transverse decay scale of the perturbation.
    pub sigma: f64,
    /// Uniform streamwise field strength (used only on MHD grids).
    pub b0: f64,
    /// Ratio of specific heats; 1.4 gives ambient sound speed 1.
    pub gamma: f64,
    /// Seed for the perturbation stream (slip surface only).
    pub iseed: i64,
}

impl Default for ProblemParams {
    fn default() -> Self {
        Self::default_double_shear()
    }
}

impl ProblemParams {
    /// Slip surface with uniform random noise on both streams.
    pub fn default_slip_surface() -> Self {
        Self {
            iprob: Iprob::SlipSurface,
            vflow: 0.5,
            drat: 2.0,
            amp: 0.01,
            width: 0.05,
            sigma: 0.2,
            b0: 0.0,
            gamma: 1.4,
            iseed: -1,
        }
    }

    /// Single tanh interface with a single-mode perturbation.
    pub fn default_single_mode() -> Self {
        Self {
            iprob: Iprob::SingleMode,
            vflow: 0.5,
            drat: 1.0,
            amp: 0.01,
            width: 0.05,
            sigma: 0.2,
            b0: 0.0,
            gamma: 1.4,
            iseed: -1,
        }
    }

    /// Periodic double shear layer with a dense inner band.
    pub fn default_double_shear() -> Self {
        Self {
            iprob: Iprob::DoubleShear,
            vflow: 0.5,
            drat: 2.0,
            amp: 0.01,
            width: 0.05,
            sigma: 0.2,
            b0: 0.0,
            gamma: 1.4,
            iseed: -1,
        }
    }
}
