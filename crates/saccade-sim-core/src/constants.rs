/// Prime multiplier used to derive per-episode RNG streams from a base seed.
/// Chosen so streams for consecutive episode indices have minimal overlap.
pub const RNG_DERIVATION_PRIME: u64 = 7919;

/// Normalized half-extent of the square world before the margin is applied.
pub const WORLD_HALF_EXTENT: f32 = 1.0;
