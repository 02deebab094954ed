//! Tuning constants for the rating and category models.

/// Initial rating assigned to every image when it enters a session.
/// The classic Elo midpoint; with K = 32 and interactive session sizes,
/// ratings stay within a few hundred points of it.
pub const INITIAL_RATING: f64 = 1500.0;

/// K-factor: the maximum rating change a single comparison can produce.
pub const K_FACTOR: f64 = 32.0;

/// Logistic scale divisor for expected-score computation.
/// A 400-point rating gap means 10:1 expected odds.
pub const RATING_SCALE: f64 = 400.0;

/// Number of percentile categories images are bucketed into at the end.
/// Category 5 is the top 20%, category 1 the bottom 20%.
pub const NUM_CATEGORIES: u8 = 5;
