//! Common utilities for testing yAxis deployment tooling.

use alloy::primitives::{Address, B256};
use std::{collections::BTreeMap, fs, io, path::Path, sync::Once};
use yaxis_deployments::{DeploymentRecord, CHAIN_ID_FILE};

pub use yaxis_manifest::{local as local_constants, test_utils as test_constants};

/// Build a fake environment from key/value pairs.
pub fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// Write a network's deployment records and chain marker under `root`, one
/// `<Name>.json` file per record, as hardhat-deploy lays them out.
pub fn write_deployments(
    root: &Path,
    network: &str,
    chain_id: u64,
    records: &[DeploymentRecord],
) -> io::Result<()> {
    let dir = root.join(network);
    fs::create_dir_all(&dir)?;
    fs::write(dir.join(CHAIN_ID_FILE), chain_id.to_string())?;

    for record in records {
        let json = serde_json::to_string_pretty(record).map_err(io::Error::other)?;
        fs::write(dir.join(format!("{}.json", record.name())), json)?;
    }
    Ok(())
}

/// A record with a predictable address, `0xNN..NN`, deployed as the only
/// transaction of block `NN`.
pub fn fake_record(name: &str, byte: u8) -> DeploymentRecord {
    DeploymentRecord::new(name, Address::repeat_byte(byte)).with_transaction(
        B256::repeat_byte(byte),
        byte.into(),
        0,
    )
}

/// Install a test log subscriber once, honoring `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
