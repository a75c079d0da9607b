//! Deterministic random number generation for demo portfolios.
//!
//! RULE: Nothing in the engine proper uses randomness — analysis is a
//! pure function of its input. Only the demo generator draws numbers,
//! and every draw flows through a single seeded stream so the same seed
//! always produces the same portfolio.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

pub struct DemoRng {
    inner: Pcg64Mcg,
}

impl DemoRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Roll a float in [lo, hi).
    pub fn in_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}
