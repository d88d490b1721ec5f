//! Parent sampling over the fitness-sorted population
//!
//! The population is kept sorted ascending by fitness, so "higher
//! index" means "fitter". Sampling is either uniform or biased toward
//! the top via a square-root transform of a draw over the squared
//! index range.

use rand::Rng;

/// Parent-sampling policy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParentBias {
    /// Every index equally likely
    Uniform,
    /// Index i drawn with probability proportional to 2i+1, favoring
    /// the fit end of the sorted array
    SquareRoot,
}

impl Default for ParentBias {
    fn default() -> Self {
        ParentBias::Uniform
    }
}

/// Sample one parent index from a fitness-sorted array of `len`
pub fn sample_parent<R: Rng>(len: usize, bias: ParentBias, rng: &mut R) -> usize {
    assert!(len > 0, "cannot sample from an empty population");
    match bias {
        ParentBias::Uniform => rng.gen_range(0..len),
        ParentBias::SquareRoot => {
            let draw = rng.gen_range(0..len * len);
            ((draw as f64).sqrt() as usize).min(len - 1)
        }
    }
}
