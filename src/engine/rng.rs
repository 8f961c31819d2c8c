//! Normal sampling on top of the injected uniform RNG.
//!
//! Every random draw in the engine funnels through a caller-supplied
//! `impl Rng` so tests and the simulator can substitute a seeded or scripted
//! source.

use rand::Rng;
use std::f64::consts::PI;

/// Standard normal sample via the Box-Muller transform.
///
/// A degenerate first draw would hit the logarithm singularity, so it is
/// rejected and redrawn; callers never see the retry.
pub fn standard_normal(rng: &mut impl Rng) -> f64 {
    loop {
        let u1: f64 = rng.gen();
        if u1 < 1e-10 {
            continue;
        }
        let u2: f64 = rng.gen();
        return (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    }
}
