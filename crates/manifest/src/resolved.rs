use alloy::primitives::Address;
use core::fmt;

/// Why a role could not be resolved on a chain.
///
/// These are soft failures. A role carrying one of these does not stop the
/// other roles in the same pass from resolving.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum UnresolvedReason {
    /// The role has no binding for the chain and no default signer.
    #[error("no binding for this chain")]
    NoBinding,
    /// The binding reads an environment variable that is not set.
    #[error("environment variable {var} is not set")]
    MissingSecret {
        /// The variable name.
        var: String,
    },
    /// The binding reads an environment variable that is not an address.
    #[error("environment variable {var} does not hold a 20-byte address")]
    MalformedSecret {
        /// The variable name.
        var: String,
    },
    /// The signer index is past the end of the network's signer list.
    #[error("signer {index} requested but the network has {available} signers")]
    SignerOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of signer slots on the network.
        available: usize,
    },
    /// The signer slot exists, but its credential is missing or invalid.
    #[error("signer {index} has no usable credential")]
    SignerUnavailable {
        /// The requested index.
        index: usize,
    },
}

/// The outcome of resolving one role on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedValue {
    /// A concrete address, from a literal or a secret.
    Address(Address),
    /// A signer from the active network's signer list.
    Signer {
        /// Position in the signer list.
        index: usize,
        /// The signer's address.
        address: Address,
    },
    /// The role is not usable on this chain.
    Unresolved(UnresolvedReason),
}

impl ResolvedValue {
    /// The resolved address, whichever source it came from.
    pub const fn address(&self) -> Option<Address> {
        match self {
            Self::Address(address) | Self::Signer { address, .. } => Some(*address),
            Self::Unresolved(_) => None,
        }
    }

    /// True if the role resolved to an address.
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved(_))
    }

    /// The reason resolution failed, if it did.
    pub const fn unresolved_reason(&self) -> Option<&UnresolvedReason> {
        match self {
            Self::Unresolved(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<Address> for ResolvedValue {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<UnresolvedReason> for ResolvedValue {
    fn from(value: UnresolvedReason) -> Self {
        Self::Unresolved(value)
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "{address}"),
            Self::Signer { index, address } => write!(f, "{address} (signer {index})"),
            Self::Unresolved(reason) => write!(f, "unresolved: {reason}"),
        }
    }
}
