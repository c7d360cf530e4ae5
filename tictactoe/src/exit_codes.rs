//! Stable exit codes for the `tictactoe` binary.

/// The game finished with a winner or a draw.
pub const OK: i32 = 0;
/// Invalid config/flow definition or any other error.
pub const INVALID: i32 = 1;
/// Input ended before the game did.
pub const ABANDONED: i32 = 2;
