/// Source of uniform random numbers used when seeding agents
pub trait RandomSource {
    /// Next value in `[0.0, 1.0)`
    fn next_f64(&mut self) -> f64;

    /// Next value in `[min, max)`
    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Fair coin flip
    fn coin(&mut self) -> bool {
        self.next_f64() < 0.5
    }
}

/// Simple pseudo-random number generator using LCG (Linear Congruential Generator).
/// Repeatable for a given seed, which is what the simulation tests rely on.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        // LCG parameters from Numerical Recipes
        const A: u32 = 1664525;
        const C: u32 = 1013904223;

        self.state = self.state.wrapping_mul(A).wrapping_add(C);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }
}

#[cfg(feature = "std")]
impl RandomSource for rand::rngs::ThreadRng {
    fn next_f64(&mut self) -> f64 {
        use rand::Rng;
        self.gen::<f64>()
    }
}

#[cfg(feature = "std")]
impl RandomSource for rand::rngs::StdRng {
    fn next_f64(&mut self) -> f64 {
        use rand::Rng;
        self.gen::<f64>()
    }
}
