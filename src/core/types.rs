//! Core type aliases and re-exports

pub use glam::DVec3;

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// Round to 4 decimal places.
///
/// Every emitted coordinate, weight and curve sample goes through this so the
/// textual form of a chunk is stable across runs. The exact binary value is
/// rounded, not `value * 1e4`: the multiply is lossy and flips values that sit
/// just below a half in the fifth decimal.
pub fn round4(value: f64) -> f64 {
    format!("{:.4}", value).parse().unwrap_or(value)
}
