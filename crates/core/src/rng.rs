//! RNG module - deterministic SplitMix64 stream
//!
//! Every random decision in the puzzle (board colors, obstacle layouts, level
//! and daily-challenge generation) is drawn from this generator so that the
//! same seed reproduces the same board bit-for-bit on every platform.

/// SplitMix64 generator
///
/// State advances by a fixed odd increment; each output is the state passed
/// through three xor-shift-multiply mixing steps.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    const INCREMENT: u64 = 0x9E37_79B9_7F4A_7C15;

    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Independent stream for a sub-task, reproducible alongside the parent seed
    pub fn derive(seed: u64, salt: u64) -> Self {
        Self::new(seed ^ salt)
    }

    /// Generate next random u64
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, n)`
    ///
    /// Draws below `2^64 mod n` are rejected, so there is no modulo bias.
    ///
    /// # Panics
    ///
    /// Panics if `n` is 0.
    pub fn next_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "next_below requires a non-empty range");
        let threshold = n.wrapping_neg() % n;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return r % n;
            }
        }
    }

    /// Uniform index in `[0, len)`
    pub fn next_index(&mut self, len: usize) -> usize {
        self.next_below(len as u64) as usize
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_index(i + 1);
            slice.swap(i, j);
        }
    }

    /// Pick one element uniformly, `None` for an empty slice
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        slice.get(self.next_index(slice.len()))
    }

    /// Current state (for resuming the same sequence)
    pub fn state(&self) -> u64 {
        self.state
    }
}
