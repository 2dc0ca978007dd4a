use crate::{DeploymentStore, StoreError};
use alloy::primitives::Address;
use std::io::{self, Write};
use yaxis_manifest::NetworkProfile;

/// Lists the contracts deployed on one network.
///
/// The reporter reads only the deployment store. It never queries the chain.
#[derive(Debug, Clone, Copy)]
pub struct Reporter<'a, S> {
    store: &'a S,
    network: &'a NetworkProfile,
}

impl<'a, S: DeploymentStore> Reporter<'a, S> {
    /// Create a reporter for the given network.
    pub const fn new(store: &'a S, network: &'a NetworkProfile) -> Self {
        Self { store, network }
    }

    /// The network being reported on.
    pub const fn network(&self) -> &NetworkProfile {
        self.network
    }

    /// Name and address of every deployed contract, in deployment order.
    pub fn list_deployments(&self) -> Result<Vec<(String, Address)>, StoreError> {
        let records = self.store.records(self.network)?;
        Ok(records.into_iter().map(|r| (r.name().to_string(), r.address())).collect())
    }
}

/// Write one `<name> <address>` line per deployment.
pub fn write_report<W: Write>(mut out: W, deployments: &[(String, Address)]) -> io::Result<()> {
    for (name, address) in deployments {
        writeln!(out, "{name} {address}")?;
    }
    out.flush()
}
