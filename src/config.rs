use serde::Deserialize;

use crate::problem::{Iprob, ProblemParams};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub problem: ProblemConfig,
    pub diffusion: DiffusionConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProblemConfig {
    /// Configuration selector: 1 slip surface, 2 single mode, 3 double shear.
    pub iprob: i32,
    pub vflow: f64,
    pub drat: f64,
    pub amp: f64,
    pub width: f64,
    pub sigma: f64,
    pub b0: f64,
    pub gamma: f64,
    /// Non-positive seed for the perturbation stream (slip surface only).
    pub iseed: i64,
}

/// Diffusion coefficients handed to the host's process-wide physics state,
/// both at problem setup and again at restart reload.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiffusionConfig {
    pub eta_ohm: f64,
    pub q_hall: f64,
    pub q_ad: f64,
    pub nu_iso: f64,
    pub nu_aniso: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            problem: ProblemConfig::default(),
            diffusion: DiffusionConfig::default(),
        }
    }
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            iprob: 3,
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

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            eta_ohm: 0.0,
            q_hall: 0.0,
            q_ad: 0.0,
            nu_iso: 0.0,
            nu_aniso: 0.0,
        }
    }
}

impl ProblemConfig {
    /// Convert the raw integer selector into typed problem parameters.
    /// Out-of-range `iprob` falls back to the double shear layer with a warning.
    pub fn params(&self) -> ProblemParams {
        let iprob = match self.iprob {
            1 => Iprob::SlipSurface,
            2 => Iprob::SingleMode,
            3 => Iprob::DoubleShear,
            other => {
                log::warn!("iprob {} not in 1..=3; using double shear layer", other);
                Iprob::DoubleShear
            }
        };
        ProblemParams {
            iprob,
            vflow: self.vflow,
            drat: self.drat,
            amp: self.amp,
            width: self.width,
            sigma: self.sigma,
            b0: self.b0,
            gamma: self.gamma,
            iseed: self.iseed,
        }
    }
}

pub fn load() -> Config {
    let path = std::path::Path::new("shearbox.yaml");
    if path.exists() {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("Warning: failed to parse shearbox.yaml: {e}; using defaults");
                    Config::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: failed to read shearbox.yaml: {e}; using defaults");
                Config::default()
            }
        }
    } else {
        Config::default()
    }
}
