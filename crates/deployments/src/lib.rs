//! Recorded yAxis deployments.
//!
//! Deployments are recorded by external tooling (hardhat-deploy) into a
//! directory per network, one JSON file per contract. This crate only reads
//! that store: the [`Reporter`] lists what was deployed on the active
//! network, in deployment order.

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

mod error;
pub use error::StoreError;

mod record;
pub use record::{DeploymentReceipt, DeploymentRecord};

mod reporter;
pub use reporter::{write_report, Reporter};

mod store;
pub use store::{DeploymentStore, FileStore, MemoryStore, CHAIN_ID_FILE};
