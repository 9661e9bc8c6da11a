//! Random draws consumed by town construction and town actions.
//!
//! Every probabilistic rule goes through [`RandomSource`], so a town can be
//! driven by a seeded stream in play and by a scripted source in tests.
use hmac::{Hmac, Mac};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::Sha256;
#[cfg(any(test, feature = "testing"))]
use std::collections::VecDeque;

/// Source of the uniform draws used by every randomized rule.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn uniform_float(&mut self) -> f64;

    /// Uniform integer in the inclusive range `lo..=hi`.
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_float(&mut self) -> f64 {
        (**self).uniform_float()
    }

    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32 {
        (**self).uniform_int(lo, hi)
    }
}

/// Seeded `ChaCha` stream that counts how many draws it has served.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: ChaCha8Rng,
    seed: u64,
    draws: u64,
}

impl SeededSource {
    /// Build a stream directly from a seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            draws: 0,
        }
    }

    /// Build the `index`-th stream of a domain derived from a user-visible seed.
    #[must_use]
    pub fn for_stream(user_seed: u64, domain: &str, index: u64) -> Self {
        Self::from_seed(derive_stream_seed(user_seed, domain.as_bytes(), index))
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of draws served so far.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for SeededSource {
    fn uniform_float(&mut self) -> f64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.gen_range(0.0..1.0)
    }

    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32 {
        debug_assert!(lo <= hi, "empty integer range {lo}..={hi}");
        self.draws = self.draws.saturating_add(1);
        self.rng.gen_range(lo..=hi.max(lo))
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8], index: u64) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    mac.update(&index.to_le_bytes());
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}

/// A single scripted draw.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Draw {
    Float(f64),
    Int(i32),
}

/// Test double that replays a fixed script of draws in order.
///
/// Panics when the script runs dry or when the next draw has the wrong shape,
/// which makes it a strict check on the draw order of an action. Only built
/// for tests or with the `testing` feature.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: VecDeque<Draw>,
    consumed: usize,
}

#[cfg(any(test, feature = "testing"))]
impl ScriptedSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a float draw.
    #[must_use]
    pub fn float(mut self, value: f64) -> Self {
        self.push(Draw::Float(value));
        self
    }

    /// Queue an integer draw.
    #[must_use]
    pub fn int(mut self, value: i32) -> Self {
        self.push(Draw::Int(value));
        self
    }

    pub fn push(&mut self, draw: Draw) {
        self.script.push_back(draw);
    }

    /// Draws still queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Draws served so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    fn next_draw(&mut self, wanted: &str) -> Draw {
        let Some(draw) = self.script.pop_front() else {
            panic!(
                "scripted source exhausted after {} draws (wanted {wanted})",
                self.consumed
            );
        };
        self.consumed += 1;
        draw
    }
}

#[cfg(any(test, feature = "testing"))]
impl RandomSource for ScriptedSource {
    fn uniform_float(&mut self) -> f64 {
        match self.next_draw("float") {
            Draw::Float(value) => value,
            other => panic!("scripted source expected a float draw, found {other:?}"),
        }
    }

    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32 {
        match self.next_draw("int") {
            Draw::Int(value) => {
                assert!(
                    (lo..=hi).contains(&value),
                    "scripted int {value} outside {lo}..={hi}"
                );
                value
            }
            other => panic!("scripted source expected an int draw, found {other:?}"),
        }
    }
}
