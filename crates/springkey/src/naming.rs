//! Animation name providers.
//!
//! Every descriptor that is active at the same time needs a distinct name.
//! Providers are plain values owned by the caller; there is no global
//! counter or generator.

use rand::Rng;
use rand_pcg::Pcg64;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Letters only; the first token character comes from here so an empty
/// prefix still yields a valid identifier.
const LETTERS: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Source of animation names.
pub trait NameProvider {
    /// Returns the next name. Names returned by one provider must not repeat
    /// while the animations that use them are active.
    fn next_name(&mut self) -> String;
}

impl<F> NameProvider for F
where
    F: FnMut() -> String,
{
    fn next_name(&mut self) -> String {
        self()
    }
}

/// `<prefix><n>` with a per-instance counter.
///
/// ```rust
/// use springkey::{NameProvider, SequentialNames};
///
/// let mut names = SequentialNames::new("spring-");
/// assert_eq!(names.next_name(), "spring-0");
/// assert_eq!(names.next_name(), "spring-1");
/// ```
#[derive(Debug, Clone)]
pub struct SequentialNames {
    prefix: String,
    next: u64,
}

impl SequentialNames {
    /// Creates a counter starting at zero.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialNames {
    fn default() -> Self {
        Self::new("spring-")
    }
}

impl NameProvider for SequentialNames {
    fn next_name(&mut self) -> String {
        let name = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        name
    }
}

/// `<prefix><token>` with a short base-36 token from a seeded PCG stream.
/// The token always starts with a letter.
///
/// The same seed always yields the same names, which keeps generated CSS
/// reproducible in tests.
#[derive(Debug, Clone)]
pub struct RandomNames {
    prefix: String,
    token_len: usize,
    rng: Pcg64,
}

impl RandomNames {
    /// Default token length.
    pub const TOKEN_LEN: usize = 6;

    /// Creates a generator from an explicit seed.
    pub fn new(prefix: impl Into<String>, seed: u64) -> Self {
        Self {
            prefix: prefix.into(),
            token_len: Self::TOKEN_LEN,
            rng: Pcg64::new(u128::from(seed), 0x0a02_bdbf_7bb3_c0a7),
        }
    }

    /// Sets the token length.
    pub fn token_len(mut self, len: usize) -> Self {
        self.token_len = len.max(1);
        self
    }
}

impl NameProvider for RandomNames {
    fn next_name(&mut self) -> String {
        let mut name = self.prefix.clone();
        for i in 0..self.token_len {
            let alphabet: &[u8] = if i == 0 { LETTERS } else { BASE36 };
            let idx = self.rng.random_range(0..alphabet.len());
            name.push(char::from(alphabet[idx]));
        }
        name
    }
}
