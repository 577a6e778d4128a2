use rand::Rng;

use crate::error::ValidationError;

/// Closed range `[min_id, max_id]` that work items are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetIdRange {
    min_id: i64,
    max_id: i64,
}

impl TargetIdRange {
    /// Creates a range, rejecting empty or single-valued ones.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdRange` when `min_id >= max_id`.
    pub const fn new(min_id: i64, max_id: i64) -> Result<Self, ValidationError> {
        if min_id >= max_id {
            return Err(ValidationError::InvalidIdRange { min_id, max_id });
        }
        Ok(Self { min_id, max_id })
    }

    #[must_use]
    pub const fn min_id(&self) -> i64 {
        self.min_id
    }

    #[must_use]
    pub const fn max_id(&self) -> i64 {
        self.max_id
    }

    #[must_use]
    pub const fn contains(&self, id: i64) -> bool {
        id >= self.min_id && id <= self.max_id
    }

    /// Draws one id uniformly from the range.
    pub fn sample<R>(&self, rng: &mut R) -> i64
    where
        R: Rng + ?Sized,
    {
        rng.gen_range(self.min_id..=self.max_id)
    }

    /// Draws `count` independent ids; repeats are allowed.
    pub fn sample_many<R>(&self, count: u64, rng: &mut R) -> Vec<i64>
    where
        R: Rng + ?Sized,
    {
        (0..count).map(|_| self.sample(rng)).collect()
    }
}
