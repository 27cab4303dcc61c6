//! Seed Derivation & Random Stream
//!
//! Every artifact the engine produces is driven by exactly one seed string.
//! This module turns that string into four 32-bit seed words (an avalanche
//! hash) and exposes a small stateful generator over them. Both halves are
//! pure arithmetic: no allocation, no shared state, no ambient entropy.
//!
//! Not cryptographically secure, and deliberately so.

/// Four 32-bit words fully determining all downstream randomness.
pub type SeedWords = [u32; 4];

const INIT: [u32; 4] = [1_779_033_703, 3_144_134_277, 1_013_904_242, 2_773_480_762];
const MUL: [u32; 4] = [597_399_067, 2_869_860_233, 951_274_213, 2_716_044_179];

/// Derive four seed words from an arbitrary string.
///
/// A single-character change in the input avalanches across all four output
/// words. The empty string is valid and yields a fixed seed.
pub fn derive_seed(input: &str) -> SeedWords {
    let [mut h1, mut h2, mut h3, mut h4] = INIT;

    for ch in input.chars() {
        let k = ch as u32;
        h1 = h2 ^ (h1 ^ k).wrapping_mul(MUL[0]);
        h2 = h3 ^ (h2 ^ k).wrapping_mul(MUL[1]);
        h3 = h4 ^ (h3 ^ k).wrapping_mul(MUL[2]);
        h4 = h1 ^ (h4 ^ k).wrapping_mul(MUL[3]);
    }

    // Finishing round: cross-mix with shifted words before combining.
    h1 = (h3 ^ (h1 >> 18)).wrapping_mul(MUL[0]);
    h2 = (h4 ^ (h2 >> 22)).wrapping_mul(MUL[1]);
    h3 = (h1 ^ (h3 >> 17)).wrapping_mul(MUL[2]);
    h4 = (h2 ^ (h4 >> 19)).wrapping_mul(MUL[3]);

    [h1 ^ h2 ^ h3 ^ h4, h2 ^ h1, h3 ^ h1, h4 ^ h1]
}

/// sfc32 pseudo-random stream over four seed words.
///
/// One instance per generation call; recomputing from the same seed string
/// must reproduce the identical sequence from scratch. The `d` counter is
/// incremented on every draw, guaranteeing a period far beyond any practical
/// number of draws per artifact.
#[derive(Debug, Clone)]
pub struct RandomStream {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl RandomStream {
    pub fn new(seed: SeedWords) -> Self {
        Self {
            a: seed[0],
            b: seed[1],
            c: seed[2],
            d: seed[3],
        }
    }

    /// Derive a stream directly from a seed string.
    pub fn from_str(input: &str) -> Self {
        Self::new(derive_seed(input))
    }

    /// Next value in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        let mut t = self.a.wrapping_add(self.b);
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(21);
        self.d = self.d.wrapping_add(1);
        t = t.wrapping_add(self.d);
        self.c = self.c.wrapping_add(t);
        f64::from(t) / 4_294_967_296.0
    }

    /// Uniform value in `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next() * (hi - lo)
    }

    /// Uniform integer in `[0, n)`.
    pub fn pick(&mut self, n: usize) -> usize {
        ((self.next() * n as f64) as usize).min(n - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_deterministic() {
        let a = derive_seed("THE SOVEREIGN MANIFESTSelf");
        let b = derive_seed("THE SOVEREIGN MANIFESTSelf");
        assert_eq!(a, b);
    }

    #[test]
    fn empty_string_is_valid() {
        let a = derive_seed("");
        let b = derive_seed("");
        assert_eq!(a, b);
    }

    #[test]
    fn single_char_edit_avalanches() {
        // Statistical property: a one-character edit should change at least
        // 3 of the 4 seed words. Checked over 100 near-duplicate strings.
        let mut full_avalanche = 0;
        for i in 0..100 {
            let base = format!("blessing-sample-{i:03}");
            let mut edited: Vec<char> = base.chars().collect();
            edited[5] = if edited[5] == 'x' { 'y' } else { 'x' };
            let edited: String = edited.into_iter().collect();

            let sa = derive_seed(&base);
            let sb = derive_seed(&edited);
            let changed = sa.iter().zip(sb.iter()).filter(|(x, y)| x != y).count();
            if changed >= 3 {
                full_avalanche += 1;
            }
        }
        assert!(full_avalanche >= 95, "avalanche count: {full_avalanche}");
    }

    #[test]
    fn stream_is_reproducible() {
        let mut s1 = RandomStream::from_str("knot");
        let mut s2 = RandomStream::from_str("knot");
        for _ in 0..500 {
            assert_eq!(s1.next().to_bits(), s2.next().to_bits());
        }
    }

    #[test]
    fn stream_stays_in_unit_interval() {
        let mut s = RandomStream::from_str("bounds");
        for _ in 0..10_000 {
            let v = s.next();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn pick_never_exceeds_bound() {
        let mut s = RandomStream::from_str("pick");
        for _ in 0..1_000 {
            assert!(s.pick(7) < 7);
        }
    }
}
