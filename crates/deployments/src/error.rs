use std::path::PathBuf;

/// The deployment store could not be read.
///
/// An empty store is not an error. Every variant here means the store itself
/// is unavailable or corrupt.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading the store failed.
    #[error("deployment store unavailable at {}: {source}", path.display())]
    Io {
        /// The file or directory being read.
        path: PathBuf,
        /// The IO failure.
        #[source]
        source: std::io::Error,
    },
    /// A record could not be decoded.
    #[error("deployment store unavailable: bad record in {}: {source}", path.display())]
    Decode {
        /// The record file.
        path: PathBuf,
        /// The decode failure.
        #[source]
        source: serde_json::Error,
    },
    /// The store's chain marker is not a chain ID.
    #[error("deployment store unavailable: {} does not hold a chain id", path.display())]
    BadChainId {
        /// The marker file.
        path: PathBuf,
    },
    /// The store was recorded against a different chain.
    #[error(
        "deployment store unavailable: {} records chain {recorded}, but the network is chain {expected}",
        path.display()
    )]
    ChainIdMismatch {
        /// The marker file.
        path: PathBuf,
        /// Chain ID in the marker.
        recorded: u64,
        /// Chain ID of the active network.
        expected: u64,
    },
}
