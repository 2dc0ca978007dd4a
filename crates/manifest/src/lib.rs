//! yAxis deployment manifest.
//!
//! This crate binds logical role names (treasury, deployer, external tokens
//! and pools) to addresses, per chain, and describes the networks those
//! roles are deployed to. The [`Manifest`] is loaded once and never mutated.
//! Selecting a network produces a [`NetworkProfile`], and resolving the
//! [`Registry`] against it produces a [`Resolution`]: one [`ResolvedValue`]
//! per role.
//!
//! Secrets (endpoints, private keys, some addresses) are never embedded in
//! the manifest. They are read at resolution time through an [`EnvSource`].
//! A missing secret leaves the dependent role [`ResolvedValue::Unresolved`]
//! rather than failing the whole pass.
//!
//! ```
//! use yaxis_manifest::{Manifest, ProcessEnv};
//!
//! let manifest = Manifest::yaxis();
//! let profile = manifest.select(None, &ProcessEnv).unwrap();
//! let roles = manifest.resolve(&profile, &ProcessEnv);
//! assert!(roles.address_of("USDC").is_some());
//! ```

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod chains;
pub use chains::{local, mainnet};
#[cfg(any(test, feature = "test-utils"))]
pub use chains::test_utils;

mod entries;

mod env;
pub use env::{ConfigError, EnvSource, ProcessEnv};

mod error;
pub use error::ManifestError;

mod manifest;
pub use manifest::Manifest;

mod network;
pub use network::{Mining, NetworkProfile, NetworkSpec, Networks, SignerSlot};

mod registry;
pub use registry::{Registry, Resolution};

mod resolved;
pub use resolved::{ResolvedValue, UnresolvedReason};

mod role;
pub use role::Role;

mod tooling;
pub use tooling::{
    CompilerConfig, CompilerSettings, EtherscanConfig, MochaConfig, OptimizerConfig,
    PathsConfig, SolidityConfig, VyperConfig,
};

mod value;
pub use value::{parse_address, Binding, Param, SecretRef};
