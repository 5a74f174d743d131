/// Countdown length of one session, in time units (seconds in the live game).
pub const SESSION_SECONDS: u32 = 60;

/// Side length of a bug's square hit box. Positions are its top-left corner.
pub const BUG_FOOTPRINT: f64 = 60.0;

pub const DEFAULT_BOARD_WIDTH: f64 = 800.0;
pub const DEFAULT_BOARD_HEIGHT: f64 = 600.0;

/// Redraw cadence assumed by the headless driver and the live frame loop.
pub const FRAMES_PER_SECOND: u32 = 60;

pub const SCORE_MOSQUITO: i32 = 1;
pub const SCORE_MALARIA: i32 = 3;
pub const SCORE_BEE: i32 = -5;

// Allowed drift when checking that kind weights sum to one.
pub const WEIGHT_SUM_EPSILON: f64 = 1e-9;
