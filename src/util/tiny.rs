use rand::SeedableRng;
use rand_xoshiro::Xoroshiro64StarStar;

/// An rng with a fixed seed, for tests and benchmarks that need to be reproducible.
pub fn consistent_rng() -> Xoroshiro64StarStar {
    seeded_rng(0)
}

pub fn seeded_rng(seed: u64) -> Xoroshiro64StarStar {
    Xoroshiro64StarStar::seed_from_u64(seed)
}
