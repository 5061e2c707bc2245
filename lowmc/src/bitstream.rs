//! The Grain-family self-shrinking generator that drives constant generation.
//!
//! Re-architected from the original coroutine (a Python generator yielding
//! bits one at a time) into a small stateful object holding the 80-bit
//! register and cursor directly, per the design notes: the rejection-sampling
//! loop in [`crate::constants`] needs an unbounded, on-demand supply of bits,
//! so a buffered precomputation would not fit as naturally as a streaming
//! `next_bit()`.

const REGISTER_LEN: usize = 80;
const TAPS: [usize; 5] = [13, 23, 38, 51, 62];
const WARMUP_STEPS: usize = 160;

/// An 80-bit Grain LFSR driving a self-shrinking generator.
///
/// Two `GrainSsg`s constructed with `new()` are bit-for-bit identical and
/// will emit identical sequences forever: the register always starts all
/// ones and the step function is pure.
pub struct GrainSsg {
    state: [bool; REGISTER_LEN],
    cursor: usize,
}

impl GrainSsg {
    /// Create a fresh generator, all-ones initial state, already warmed up
    /// for 160 discarded steps.
    pub fn new() -> Self {
        let mut gen = GrainSsg {
            state: [true; REGISTER_LEN],
            cursor: 0,
        };
        for _ in 0..WARMUP_STEPS {
            gen.step();
        }
        gen
    }

    /// Apply the feedback function to `state[cursor]`, advance the cursor,
    /// and return the bit just written.
    fn step(&mut self) -> bool {
        let i = self.cursor;
        let feedback = self.state[i]
            ^ self.state[(i + TAPS[0]) % REGISTER_LEN]
            ^ self.state[(i + TAPS[1]) % REGISTER_LEN]
            ^ self.state[(i + TAPS[2]) % REGISTER_LEN]
            ^ self.state[(i + TAPS[3]) % REGISTER_LEN]
            ^ self.state[(i + TAPS[4]) % REGISTER_LEN];
        self.state[i] = feedback;
        self.cursor = (self.cursor + 1) % REGISTER_LEN;
        feedback
    }

    /// Produce the next bit of the self-shrunk output sequence: step, take
    /// `choice`; step again, take `value`; emit `value` only if `choice` was
    /// set, otherwise retry.
    pub fn next_bit(&mut self) -> bool {
        loop {
            let choice = self.step();
            let value = self.step();
            if choice {
                return value;
            }
        }
    }

    /// Collect `n` bits of output, in emission order.
    pub fn next_bits(&mut self, n: usize) -> Vec<bool> {
        (0..n).map(|_| self.next_bit()).collect()
    }
}

impl Default for GrainSsg {
    fn default() -> Self {
        GrainSsg::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn determinism() {
        let mut a = GrainSsg::new();
        let mut b = GrainSsg::new();
        assert_eq!(a.next_bits(500), b.next_bits(500));
    }

    #[test]
    fn produces_both_bit_values() {
        let mut gen = GrainSsg::new();
        let bits = gen.next_bits(2000);
        assert!(bits.iter().any(|b| *b));
        assert!(bits.iter().any(|b| !*b));
    }
}
