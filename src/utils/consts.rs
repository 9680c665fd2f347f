/// Log level (overridden by RUST_LOG)
pub const LOG_LEVEL: &str = "info";

// ============================================================================
// Harness defaults
// ============================================================================

/// Bytes per fill/check cycle
pub const DEFAULT_BUFFER_SIZE: usize = 2048;

/// Number of fill/check cycles
pub const DEFAULT_CYCLES: usize = 10;

// ============================================================================
// Checker policy
// ============================================================================

/// Both checker windows are kept in a u128 shift register
pub const WINDOW_CAPACITY_BITS: u32 = 128;

/// Lower bound on the confirmation length, keeps short registers from
/// locking on noise (false lock ~ 2^-12 per attempt)
pub const MIN_CONFIRMATION_BITS: u32 = 12;

/// Mismatches allowed while confirming a trial lock
pub const DEFAULT_ACQUISITION_TOLERANCE: u32 = 0;

/// Bits a trial lock must predict before sync is reported
pub const DEFAULT_PROBATION_BITS: u32 = 64;

/// Mismatches allowed during probation (12.5 %). Random data passes with
/// probability ~3e-10, on top of the 2^-confirmation window match.
pub const DEFAULT_PROBATION_TOLERANCE: u32 = 8;

/// Trailing synced bits watched for sync loss
pub const DEFAULT_LOSS_WINDOW_BITS: u32 = 128;

/// Sync is lost above this many mismatches in the window (25 %)
pub const DEFAULT_LOSS_THRESHOLD: u32 = 32;
