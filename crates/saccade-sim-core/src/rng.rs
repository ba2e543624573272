use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Derive a sub-RNG for a specific episode, ensuring independent streams
/// when several generators run in parallel from one base seed.
pub fn derive_episode_rng(base_seed: u64, episode: usize) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(
        base_seed.wrapping_add(episode as u64 * crate::constants::RNG_DERIVATION_PRIME),
    )
}
