use rand::RngCore;
use crate::utils::constants::JIGGLE_SCALE;

const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Linear congruential generator used as the default random source.
///
/// Arithmetic is modulo 2^32, so two generators built from the same seed
/// produce the same sequence on every platform.
///
/// # Examples
///
/// ```
/// use rand::RngCore;
/// use rs_force_layout::utils::Lcg;
///
/// let mut a = Lcg::default();
/// let mut b = Lcg::new(1);
/// assert_eq!(a.next_u32(), b.next_u32());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    fn next_u64(&mut self) -> u64 {
        let high = self.next_u32() as u64;
        let low = self.next_u32() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// Returns a uniform sample from [0, 1) built from one 32-bit draw.
pub fn unit_sample(random: &mut dyn RngCore) -> f64 {
    random.next_u32() as f64 / TWO_POW_32
}

/// Returns a tiny signed offset used to separate exactly coincident coordinates.
pub fn jiggle(random: &mut dyn RngCore) -> f64 {
    (unit_sample(random) - 0.5) * JIGGLE_SCALE
}
