// L'Ecuyer combined multiplicative congruential generator with Bays-Durham
// shuffle, period > 2e18. This is a deliberate port of the exact generator
// the legacy problem setups were seeded with: regression data for existing
// run configurations is only bit-reproducible against this construction, so
// a modern RNG crate is not a drop-in substitute here.

const IM1: i64 = 2147483563;
const IM2: i64 = 2147483399;
const AM: f64 = 1.0 / IM1 as f64;
const IMM1: i64 = IM1 - 1;
const IA1: i64 = 40014;
const IA2: i64 = 40692;
const IQ1: i64 = 53668;
const IQ2: i64 = 52774;
const IR1: i64 = 12211;
const IR2: i64 = 3791;
const NTAB: usize = 32;
const NDIV: i64 = 1 + IMM1 / NTAB as i64;
const RNMX: f64 = 1.0 - f64::EPSILON;

/// Long-period uniform deviate stream with explicit, restartable state.
///
/// Seed with a non-positive value; the first draw initializes the shuffle
/// table deterministically, so the same seed magnitude always yields the
/// same sequence. Draws lie strictly inside (0, 1).
pub struct Ran2 {
    idum: i64,
    idum2: i64,
    iy: i64,
    iv: [i64; NTAB],
}

impl Ran2 {
    /// New stream from a seed; the sign is ignored (state is stored
    /// non-positive so the first draw triggers initialization).
    pub fn new(seed: i64) -> Self {
        Self {
            idum: -seed.abs(),
            idum2: 123456789,
            iy: 0,
            iv: [0; NTAB],
        }
    }

    /// Restart the sequence; equivalent to constructing a fresh stream.
    pub fn reseed(&mut self, seed: i64) {
        *self = Self::new(seed);
    }

    /// Next uniform deviate in (0, 1), exclusive of both endpoints.
    pub fn next(&mut self) -> f64 {
        if self.idum <= 0 {
            // Initialize: clamp the seed away from zero, then load the
            // shuffle table after 8 warm-up passes.
            self.idum = (-self.idum).max(1);
            self.idum2 = self.idum;
            for j in (0..NTAB + 8).rev() {
                let k = self.idum / IQ1;
                self.idum = IA1 * (self.idum - k * IQ1) - k * IR1;
                if self.idum < 0 {
                    self.idum += IM1;
                }
                if j < NTAB {
                    self.iv[j] = self.idum;
                }
            }
            self.iy = self.iv[0];
        }

        // Advance both generators by Schrage's method (no overflow).
        let k = self.idum / IQ1;
        self.idum = IA1 * (self.idum - k * IQ1) - k * IR1;
        if self.idum < 0 {
            self.idum += IM1;
        }
        let k = self.idum2 / IQ2;
        self.idum2 = IA2 * (self.idum2 - k * IQ2) - k * IR2;
        if self.idum2 < 0 {
            self.idum2 += IM2;
        }

        // Shuffle: index the table by the previous output, combine with the
        // second generator, refill the slot.
        let j = (self.iy / NDIV) as usize;
        self.iy = self.iv[j] - self.idum2;
        self.iv[j] = self.idum;
        if self.iy < 1 {
            self.iy += IMM1;
        }

        let temp = AM * self.iy as f64;
        if temp > RNMX {
            RNMX
        } else {
            temp
        }
    }
}
