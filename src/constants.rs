// Round timing constants
pub const TICK_INTERVAL_MS: u64 = 60;
pub const MAX_TICK_SECONDS: f64 = 0.1;

// Crash target constraints
pub const MIN_CRASH_TARGET: f64 = 1.01;

// Base crash-point bands: low [1.0, 2.0), mid [2.0, 4.0), high [4.0, 10.0)
pub const BAND_LOW_START: f64 = 1.0;
pub const BAND_LOW_SPAN: f64 = 1.0;
pub const BAND_MID_START: f64 = 2.0;
pub const BAND_MID_SPAN: f64 = 2.0;
pub const BAND_HIGH_START: f64 = 4.0;
pub const BAND_HIGH_SPAN: f64 = 6.0;

// Inventory rigging thresholds
pub const CRITICAL_STOCK_RATIO: f64 = 0.1;
pub const LOW_STOCK_RATIO: f64 = 0.3;
pub const CRITICAL_RIG_DRAW_SPAN: f64 = 0.5;
pub const LOW_RIG_DRAW_SPAN: f64 = 0.3;

// Trend constants (per-second drift while trending up or down)
pub const TREND_STRENGTH: f64 = 0.14;
pub const TREND_MIN_HOLD_SECONDS: f64 = 2.5;
pub const TREND_FLIP_CHANCE: f64 = 0.12;

// Extra downward pull as the hidden deadline approaches
pub const CRASH_PULL_FACTOR: f64 = 0.08;
pub const LATE_ROUND_PROXIMITY: f64 = 0.7;
pub const LATE_ROUND_DRAG: f64 = 0.06;

// Fat-tail jumps, asymmetric: upside slightly more frequent and larger
pub const UPSIDE_JUMP_CHANCE: f64 = 0.06;
pub const UPSIDE_JUMP_SCALE: f64 = 0.08;
pub const DOWNSIDE_JUMP_CHANCE: f64 = 0.04;
pub const DOWNSIDE_JUMP_SCALE: f64 = 0.06;

// Volatility clustering: a large move arms one elevated-sigma tick
pub const CLUSTER_TRIGGER_RETURN: f64 = 0.03;
pub const CLUSTER_BASE_BOOST: f64 = 1.2;
pub const CLUSTER_RETURN_WEIGHT: f64 = 4.0;
pub const CLUSTER_MAX_BOOST: f64 = 0.8;

// Displayed path clamp: floor below 1.0, ceiling relative to the hidden target
pub const MULTIPLIER_FLOOR: f64 = 0.72;
pub const OVERSHOOT_RATIO: f64 = 1.4;

// Recent-wins list shown at the stall
pub const RECENT_WINS_MAX: usize = 5;
