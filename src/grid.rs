/// Physical extents of the rectangular domain.
///
/// Fields are public so tests and hosts can override a single axis:
/// `Domain { x2min: -1.0, x2max: 1.0, ..Domain::default() }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub x1min: f64,
    pub x1max: f64,
    pub x2min: f64,
    pub x2max: f64,
    pub x3min: f64,
    pub x3max: f64,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            x1min: 0.0,
            x1max: 1.0,
            x2min: -0.5,
            x2max: 0.5,
            x3min: -0.5,
            x3max: 0.5,
        }
    }
}

/// Cell-centered conserved-variable storage, row-major in (k, j, i).
///
/// Stand-in for the host solver's mesh: the problem generator writes every
/// field once at setup, the diagnostics read them back. Optional physics
/// (total energy, magnetic field, passive scalar) are carried as `Option`
/// buffers so a hydro, barotropic, or scalar-free host maps onto the same
/// type.
pub struct Grid {
    pub nx1: usize,
    pub nx2: usize,
    pub nx3: usize,
    pub domain: Domain,
    /// Density, strictly positive after initialization.
    pub d: Vec<f64>,
    /// Momentum components.
    pub m1: Vec<f64>,
    pub m2: Vec<f64>,
    pub m3: Vec<f64>,
    /// Total energy. None for barotropic builds.
    pub e: Option<Vec<f64>>,
    /// Face-centered streamwise field, one extra face in i. None without MHD.
    pub b1i: Option<Vec<f64>>,
    /// Cell-centered field components. None without MHD.
    pub b1c: Option<Vec<f64>>,
    pub b2c: Option<Vec<f64>>,
    pub b3c: Option<Vec<f64>>,
    /// First passive scalar, used as a two-valued fluid-origin tracer.
    pub s: Option<Vec<f64>>,
}

impl Grid {
    /// Hydro grid with total energy and one passive scalar, no magnetic field.
    pub fn new(nx1: usize, nx2: usize, nx3: usize, domain: Domain) -> Self {
        let n = nx1 * nx2 * nx3;
        Self {
            nx1,
            nx2,
            nx3,
            domain,
            d: vec![0.0; n],
            m1: vec![0.0; n],
            m2: vec![0.0; n],
            m3: vec![0.0; n],
            e: Some(vec![0.0; n]),
            b1i: None,
            b1c: None,
            b2c: None,
            b3c: None,
            s: Some(vec![0.0; n]),
        }
    }

    /// Attach magnetic field buffers (face-centered b1i plus cell centers).
    pub fn with_mhd(mut self) -> Self {
        let n = self.nx1 * self.nx2 * self.nx3;
        let nface = (self.nx1 + 1) * self.nx2 * self.nx3;
        self.b1i = Some(vec![0.0; nface]);
        self.b1c = Some(vec![0.0; n]);
        self.b2c = Some(vec![0.0; n]);
        self.b3c = Some(vec![0.0; n]);
        self
    }

    /// Drop the total-energy buffer (barotropic equation of state).
    pub fn barotropic(mut self) -> Self {
        self.e = None;
        self
    }

    /// Drop the passive-scalar buffer.
    pub fn without_scalar(mut self) -> Self {
        self.s = None;
        self
    }

    pub fn is_3d(&self) -> bool {
        self.nx3 > 1
    }

    pub fn ncells(&self) -> usize {
        self.nx1 * self.nx2 * self.nx3
    }

    /// Cell index for in-bounds (i, j, k).
    #[inline(always)]
    pub const fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.nx2 + j) * self.nx1 + i
    }

    /// Face index into b1i; i runs 0..=nx1 (one extra face).
    #[inline(always)]
    pub const fn idx_b1i(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.nx2 + j) * (self.nx1 + 1) + i
    }

    /// Physical position of the center of cell (i, j, k).
    pub fn cc_pos(&self, i: usize, j: usize, k: usize) -> (f64, f64, f64) {
        let dm = &self.domain;
        let dx1 = (dm.x1max - dm.x1min) / self.nx1 as f64;
        let dx2 = (dm.x2max - dm.x2min) / self.nx2 as f64;
        let dx3 = (dm.x3max - dm.x3min) / self.nx3 as f64;
        (
            dm.x1min + (i as f64 + 0.5) * dx1,
            dm.x2min + (j as f64 + 0.5) * dx2,
            dm.x3min + (k as f64 + 0.5) * dx3,
        )
    }
}
