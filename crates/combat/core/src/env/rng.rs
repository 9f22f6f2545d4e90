//! RNG oracle for deterministic random number generation.
//!
//! Every roll the engine makes (hit, dodge, block, critical) is one draw from
//! a single injected generator. There is no global fallback: an engine cannot
//! be built without one, so a seeded engine always replays the same sequence.
//!
//! # Determinism
//!
//! Implementations must be deterministic: given the same seed they produce the
//! same sequence. Draw counts are observable through [`RngOracle::draws`] so
//! tests can assert exactly how many rolls a resolution consumed.

/// Stateful source of random draws.
pub trait RngOracle: Send {
    /// Generate the next random u32 value and advance the generator.
    fn next_u32(&mut self) -> u32;

    /// Number of values drawn from this generator so far.
    fn draws(&self) -> u64;

    /// Uniform value in `[0, 1)`. Consumes exactly one draw.
    fn uniform(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Single draw against a probability, using the `draw < chance` convention.
    fn chance(&mut self, probability: f64) -> bool {
        self.uniform() < probability
    }
}

impl<R: RngOracle + ?Sized> RngOracle for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn draws(&self) -> u64 {
        (**self).draws()
    }

    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same sequence
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
    draws: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator whose sequence is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            state: mix_seed(seed),
            draws: 0,
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        self.draws += 1;
        Self::pcg_output(self.state)
    }

    fn draws(&self) -> u64 {
        self.draws
    }
}

/// Mix an encounter seed into an initial PCG state.
///
/// Constants are the Murmur3 finalizer multipliers.
fn mix_seed(seed: u64) -> u64 {
    let mut hash = seed;
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;

    hash
}

/// Replays a fixed script of uniform values.
///
/// Each call to [`RngOracle::uniform`] returns the next scripted value and
/// counts as one draw. Once the script is exhausted the `tail` value is
/// returned forever (0.5 unless overridden with [`ScriptedRng::then`]).
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedRng {
    script: Vec<f64>,
    cursor: usize,
    tail: f64,
    draws: u64,
}

impl ScriptedRng {
    /// Creates a generator that yields `values` in order.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            script: values.into_iter().collect(),
            cursor: 0,
            tail: 0.5,
            draws: 0,
        }
    }

    /// A generator that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(Vec::new()).then(value)
    }

    /// Sets the value returned after the script runs out.
    #[must_use]
    pub fn then(mut self, tail: f64) -> Self {
        self.tail = tail.clamp(0.0, 1.0 - f64::EPSILON);
        self
    }

    /// Scripted values not yet consumed.
    pub fn remaining(&self) -> &[f64] {
        &self.script[self.cursor.min(self.script.len())..]
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.uniform() * (f64::from(u32::MAX) + 1.0)) as u32
    }

    fn draws(&self) -> u64 {
        self.draws
    }

    fn uniform(&mut self) -> f64 {
        self.draws += 1;
        match self.script.get(self.cursor) {
            Some(&value) => {
                self.cursor += 1;
                value
            }
            None => self.tail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_same_seed_same_sequence() {
        let mut a = PcgRng::seeded(42);
        let mut b = PcgRng::seeded(42);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
        assert_eq!(a.draws(), 32);
    }

    #[test]
    fn pcg_different_seeds_diverge() {
        let mut a = PcgRng::seeded(42);
        let mut b = PcgRng::seeded(43);
        let a_values: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let b_values: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(a_values, b_values);
    }

    #[test]
    fn uniform_stays_in_unit_interval() {
        let mut rng = PcgRng::seeded(7);
        for _ in 0..1000 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn scripted_replays_then_tails() {
        let mut rng = ScriptedRng::new([0.1, 0.9]).then(0.3);
        assert_eq!(rng.uniform(), 0.1);
        assert_eq!(rng.uniform(), 0.9);
        assert!(rng.remaining().is_empty());
        assert_eq!(rng.uniform(), 0.3);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn chance_uses_strict_less_than() {
        let mut rng = ScriptedRng::new([0.25, 0.25]);
        assert!(!rng.chance(0.25));
        assert!(rng.chance(0.26));
    }

    #[test]
    fn borrowed_rng_counts_on_the_owner() {
        let mut owner = ScriptedRng::constant(0.4);
        {
            let borrowed = &mut owner;
            borrowed.uniform();
            borrowed.uniform();
        }
        assert_eq!(owner.draws(), 2);
    }
}
