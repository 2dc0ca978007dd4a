/// Local development chain constants.
pub mod local;

/// Ethereum mainnet constants.
pub mod mainnet;

/// Test manifest constants.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// The yAxis deployment manifest, as shipped with this crate.
pub(crate) const BUILTIN_MANIFEST: &str = include_str!("yaxis.json");
