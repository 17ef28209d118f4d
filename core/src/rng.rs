//! Deterministic RNG for spawns and id generation
//!
//! The browser client seeds it from `getrandom`; tests seed it with constants
//! so spawn draws and generated ids are reproducible.

/// Trait for random number generation in the game
pub trait GameRng {
    /// Generate a random u32
    fn next_u32(&mut self) -> u32;

    /// Generate a uniformly distributed number in range [0, max)
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        let bound = u32::try_from(max).unwrap_or(u32::MAX);
        // Draws below 2^32 mod bound would favour the low values
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let x = self.next_u32();
            if x >= threshold {
                return (x % bound) as usize;
            }
        }
    }

    /// Uniform draw in [0, 1) with 24 bits of precision
    fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32() >> 8) / f64::from(1u32 << 24)
    }

    /// Fill a buffer with random bytes
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// XorShift32 RNG - simple, fast, deterministic
///
/// This is suitable for game logic where cryptographic security is not needed.
/// The same seed will always produce the same sequence.
#[derive(Debug, Clone)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Create a new RNG from a u64 seed
    ///
    /// The seed is combined into a u32, ensuring state is never 0.
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = ((seed as u32) ^ ((seed >> 32) as u32)).max(1);
        Self { state }
    }

    /// Create a new RNG from a u32 seed
    pub fn seed_from_u32(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }
}

impl GameRng for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}
