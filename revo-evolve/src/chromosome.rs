//! Chromosome operators over the 4-byte weight vector
//!
//! A chromosome is a [`Weights`] value viewed as four bytes in field
//! order. Crossover cuts at a byte boundary; mutation flips a single
//! bit. Both work on the byte view so the genetic semantics are
//! independent of how the fields are interpreted by evaluation.

use rand::Rng;
use revo_core::Weights;

/// Ancestor vector every fresh population descends from
pub const SEED_WEIGHTS: Weights = Weights::new(2, 253, 98, 16);

/// Cross two parents at the given byte boundary.
///
/// Offspring bytes `[0, boundary)` come from `a`, the rest from `b`;
/// boundary 0 clones `b` outright.
pub fn crossover_at(a: &Weights, b: &Weights, boundary: usize) -> Weights {
    assert!(boundary < 4, "crossover boundary out of range: {boundary}");
    let mut bytes = b.to_bytes();
    bytes[..boundary].copy_from_slice(&a.to_bytes()[..boundary]);
    Weights::from_bytes(bytes)
}

/// Cross two parents at a uniformly random byte boundary in {0,1,2,3}
pub fn crossover<R: Rng>(a: &Weights, b: &Weights, rng: &mut R) -> Weights {
    crossover_at(a, b, rng.gen_range(0..4))
}

/// Flip one randomly chosen bit within one randomly chosen byte
pub fn mutate<R: Rng>(weights: &Weights, rng: &mut R) -> Weights {
    let bit = rng.gen_range(0..32);
    let mut bytes = weights.to_bytes();
    bytes[bit / 8] ^= 1 << (bit % 8);
    Weights::from_bytes(bytes)
}

/// Fresh chromosome: the seed vector nudged by one mutation
pub fn spawn<R: Rng>(rng: &mut R) -> Weights {
    mutate(&SEED_WEIGHTS, rng)
}

/// Population of freshly spawned chromosomes
pub fn seed_population<R: Rng>(size: usize, rng: &mut R) -> Vec<Weights> {
    (0..size).map(|_| spawn(rng)).collect()
}
