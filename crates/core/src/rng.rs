use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Uniform draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen()
    }
}

/// Samples an index from a discrete distribution given by `weights`.
///
/// Non-positive weights are skipped. Returns `None` when no weight is
/// positive. Shared by the upgrade outcome roll and the enchant tier roll.
pub fn sample_weighted(weights: &[f64], rng: &mut RngState) -> Option<usize> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }
    let mut roll = rng.next_f64() * total;
    let mut last = None;
    for (idx, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        if roll < weight {
            return Some(idx);
        }
        roll -= weight;
        last = Some(idx);
    }
    // Float rounding can leave a sliver of roll after the final bucket.
    last
}

/// Uniform pick from a pool of candidate indices.
pub fn pick_index(indices: &[usize], rng: &mut RngState) -> Option<usize> {
    if indices.is_empty() {
        return None;
    }
    let idx = (rng.next_u64() % indices.len() as u64) as usize;
    indices.get(idx).copied()
}
