/// Errors raised while loading a manifest or selecting a network from it.
///
/// Every variant here is structural: it is raised before any role is
/// resolved, or in place of a resolution pass. Per-role gaps are reported as
/// [`UnresolvedReason`] values instead.
///
/// [`UnresolvedReason`]: crate::UnresolvedReason
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The selector named a network the manifest does not declare.
    #[error("network {name} is not declared. declared networks: {declared}")]
    UnknownNetwork {
        /// The requested network name.
        name: String,
        /// Comma-separated list of declared network names.
        declared: String,
    },
    /// Two roles share a name.
    #[error("role {0} is declared more than once")]
    DuplicateRole(String),
    /// Two networks share a name.
    #[error("network {0} is declared more than once")]
    DuplicateNetwork(String),
    /// A key appears twice within one object.
    #[error("key {key} is declared more than once in {scope}")]
    DuplicateKey {
        /// The object containing the duplicate.
        scope: String,
        /// The duplicated key.
        key: String,
    },
    /// An address literal is not a 20-byte hex identifier.
    #[error("malformed address {value:?} in {context}")]
    MalformedAddress {
        /// Where the literal was found.
        context: String,
        /// The offending literal.
        value: String,
    },
    /// A role key looks like a chain id but is not canonical decimal.
    #[error("invalid chain id key {key:?} in {context}")]
    InvalidChainKey {
        /// Where the key was found.
        context: String,
        /// The offending key.
        key: String,
    },
    /// A signer index is not a non-negative integer.
    #[error("invalid signer index {value} in {context}")]
    InvalidSignerIndex {
        /// Where the index was found.
        context: String,
        /// The offending value.
        value: String,
    },
    /// The manifest redeclares the local network as something other than
    /// the in-process development chain.
    #[error("invalid local network: {0}")]
    InvalidLocalNetwork(String),
    /// A role lookup named a role the manifest does not declare.
    #[error("role {0} is not declared")]
    UnknownRole(String),
    /// An endpoint URL failed to parse.
    #[error("invalid url in {context}: {source}")]
    InvalidUrl {
        /// Where the URL was found.
        context: String,
        /// The parse failure.
        #[source]
        source: url::ParseError,
    },
    /// The manifest is not well-formed JSON, or has the wrong shape.
    #[error("failed to parse manifest: {0}")]
    Json(#[from] serde_json::Error),
    /// The manifest file could not be read.
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
}

impl ManifestError {
    /// Unknown network, listing the declared ones.
    pub fn unknown_network<'a>(name: &str, declared: impl IntoIterator<Item = &'a str>) -> Self {
        let declared = declared.into_iter().collect::<Vec<_>>().join(", ");
        Self::UnknownNetwork { name: name.to_string(), declared }
    }

    /// Malformed address literal.
    pub fn malformed_address(context: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedAddress { context: context.into(), value: value.into() }
    }
}
