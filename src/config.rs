//! Application-level configuration constants.

// Penalties
pub const PLUS_TWO_MS: u32 = 2_000;

// Rolling average windows reported in `CubeStats`
pub const AO5: usize = 5;
pub const AO12: usize = 12;
pub const AO50: usize = 50;
pub const AO100: usize = 100;

// Sessions
pub const DEFAULT_SESSION: &str = "Default";

// Scramble grammar
pub const MODIFIERS: [&str; 3] = ["", "'", "2"];
pub const MEGAMINX_LINES: usize = 7;
pub const MEGAMINX_PAIRS_PER_LINE: usize = 5;

// Move palettes offered when defining a custom puzzle type
pub const STANDARD_MOVES: [&str; 6] = ["R", "L", "U", "D", "F", "B"];
pub const WIDE_MOVES: [&str; 6] = ["Rw", "Lw", "Uw", "Dw", "Fw", "Bw"];
pub const SLICE_MOVES: [&str; 3] = ["M", "E", "S"];
