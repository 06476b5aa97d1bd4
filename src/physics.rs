// Process-wide diffusion coefficients, owned here as an explicit struct so
// problem setup and restart reload mutate the same instance through one
// contract instead of ambient globals.

use std::io::{self, Read, Write};

use crate::config::DiffusionConfig;

const RESTART_MAGIC: &[u8; 4] = b"SHBX";
const RESTART_VERSION: u32 = 1;

/// Resistive, Hall, ambipolar, and viscous coefficients read from the
/// configuration. The host's integrator consumes these; this crate only
/// supplies their values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhysicsState {
    pub eta_ohm: f64,
    pub q_hall: f64,
    pub q_ad: f64,
    pub nu_iso: f64,
    pub nu_aniso: f64,
}

impl PhysicsState {
    /// Assign all coefficients from the configuration. Called at problem
    /// setup and again at restart reload; both paths go through here.
    pub fn apply(&mut self, cfg: &DiffusionConfig) {
        self.eta_ohm = cfg.eta_ohm;
        self.q_hall = cfg.q_hall;
        self.q_ad = cfg.q_ad;
        self.nu_iso = cfg.nu_iso;
        self.nu_aniso = cfg.nu_aniso;
    }

    /// Persist the coefficients: magic, version, then five little-endian f64.
    pub fn write_restart<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(RESTART_MAGIC)?;
        w.write_all(&RESTART_VERSION.to_le_bytes())?;
        for v in [self.eta_ohm, self.q_hall, self.q_ad, self.nu_iso, self.nu_aniso] {
            w.write_all(&v.to_le_bytes())?;
        }
        Ok(())
    }

    pub fn read_restart<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if &magic != RESTART_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid restart magic: {:?}", magic),
            ));
        }

        let mut buf4 = [0u8; 4];
        r.read_exact(&mut buf4)?;
        let version = u32::from_le_bytes(buf4);
        if version != RESTART_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported restart version: {}", version),
            ));
        }

        let mut buf8 = [0u8; 8];
        let mut vals = [0.0f64; 5];
        for v in &mut vals {
            r.read_exact(&mut buf8)?;
            *v = f64::from_le_bytes(buf8);
        }
        Ok(Self {
            eta_ohm: vals[0],
            q_hall: vals[1],
            q_ad: vals[2],
            nu_iso: vals[3],
            nu_aniso: vals[4],
        })
    }
}
