// Rating model constants
pub const K_FACTOR: f64 = 32.0;
pub const DEFAULT_RATING: i32 = 1000;
pub const RATING_SCALE: f64 = 400.0;

// Matchup tables are capped to the strongest/weakest opponents
pub const MATCHUP_LIMIT: usize = 5;
