//! Seedable random source used for glyph colors and rotation picks.

/// Source of random integers consumed by the placement engine.
///
/// Output must depend only on the seed and the call sequence so that
/// identical inputs produce identical clouds.
pub trait RandomSource {
    /// Next non-negative integer (63 significant bits).
    fn next_int(&mut self) -> u64;

    /// Next index in `0..n`.  `n` must be positive.
    fn next_index(&mut self, n: usize) -> usize {
        assert!(n > 0, "next_index requires a non-empty range");
        (self.next_int() % n as u64) as usize
    }
}

/// xorshift64* generator.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        // xorshift has a fixed point at zero.
        Self { state: if seed == 0 { 0x9e37_79b9_7f4a_7c15 } else { seed } }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }
}

impl RandomSource for SeededRandom {
    fn next_int(&mut self) -> u64 {
        self.next_u64() >> 1
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_int(&mut self) -> u64 {
        (**self).next_int()
    }

    fn next_index(&mut self, n: usize) -> usize {
        (**self).next_index(n)
    }
}
