use crate::{DeploymentRecord, StoreError};
use indexmap::IndexMap;
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};
use yaxis_manifest::NetworkProfile;

/// Name of the chain marker inside a network's directory.
pub const CHAIN_ID_FILE: &str = ".chainId";

/// A read-only source of deployment records.
pub trait DeploymentStore {
    /// The latest record of every contract deployed on the network, in
    /// deployment order. Empty if nothing was recorded.
    fn records(&self, network: &NetworkProfile) -> Result<Vec<DeploymentRecord>, StoreError>;
}

impl<T: DeploymentStore + ?Sized> DeploymentStore for &T {
    fn records(&self, network: &NetworkProfile) -> Result<Vec<DeploymentRecord>, StoreError> {
        (**self).records(network)
    }
}

/// Fold an append-only sequence of records down to the latest per name.
///
/// A redeployed contract keeps the position of its first record.
fn latest(records: impl IntoIterator<Item = DeploymentRecord>) -> Vec<DeploymentRecord> {
    let mut by_name = IndexMap::new();
    for record in records {
        by_name.insert(record.name().to_string(), record);
    }
    by_name.into_values().collect()
}

/// Deployment order: by block and transaction index, then records without
/// a receipt. Ties break on the name.
fn deployment_order(record: &DeploymentRecord) -> (bool, Option<(u64, u64)>, &str) {
    let position = record.position();
    (position.is_none(), position, record.name())
}

/// The contract name of a record file: the stem of a visible `.json` file.
fn record_name(path: &Path) -> Option<&str> {
    if path.extension()? != "json" {
        return None;
    }
    path.file_stem()?.to_str().filter(|stem| !stem.is_empty() && !stem.starts_with('.'))
}

/// Deployment records kept on disk, in the layout written by hardhat-deploy.
///
/// Each network has a directory under the root, named after the network. It
/// holds one `<Contract>.json` file per deployed contract, and optionally a
/// `.chainId` marker naming the chain the records belong to. Other files
/// and subdirectories (`solcInputs/`, `.migrations.json`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`. Nothing is read until records are
    /// requested.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory holding a network's records.
    pub fn network_dir(&self, network: &str) -> PathBuf {
        self.root.join(network)
    }

    /// Read a file, treating absence as `None`.
    fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path: path.to_path_buf(), source }),
        }
    }

    fn check_chain_id(dir: &Path, expected: u64) -> Result<(), StoreError> {
        let path = dir.join(CHAIN_ID_FILE);
        let Some(contents) = Self::read_optional(&path)? else {
            return Ok(());
        };
        let recorded = contents
            .trim()
            .parse::<u64>()
            .map_err(|_| StoreError::BadChainId { path: path.clone() })?;
        if recorded != expected {
            return Err(StoreError::ChainIdMismatch { path, recorded, expected });
        }
        Ok(())
    }
}

impl DeploymentStore for FileStore {
    #[instrument(skip_all, fields(network = network.name()))]
    fn records(&self, network: &NetworkProfile) -> Result<Vec<DeploymentRecord>, StoreError> {
        let dir = self.network_dir(network.name());
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %dir.display(), "no deployments recorded");
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::Io { path: dir, source }),
        };
        Self::check_chain_id(&dir, network.chain_id())?;

        let mut records = Vec::new();
        for entry in entries {
            let path = entry.map_err(|source| StoreError::Io { path: dir.clone(), source })?.path();
            let Some(name) = record_name(&path) else {
                continue;
            };
            if !path.is_file() {
                continue;
            }
            let contents = fs::read_to_string(&path)
                .map_err(|source| StoreError::Io { path: path.clone(), source })?;
            let record = serde_json::from_str::<DeploymentRecord>(&contents)
                .map_err(|source| StoreError::Decode { path: path.clone(), source })?;
            records.push(record.named(name));
        }
        records.sort_by(|a, b| deployment_order(a).cmp(&deployment_order(b)));

        debug!(records = records.len(), "read deployment records");
        Ok(records)
    }
}

/// Deployment records kept in memory, keyed by network name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    networks: HashMap<String, Vec<DeploymentRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to a network's log.
    pub fn record(&mut self, network: impl Into<String>, record: DeploymentRecord) {
        self.networks.entry(network.into()).or_default().push(record);
    }

    /// Append a record, builder style.
    pub fn with_record(mut self, network: impl Into<String>, record: DeploymentRecord) -> Self {
        self.record(network, record);
        self
    }
}

impl DeploymentStore for MemoryStore {
    fn records(&self, network: &NetworkProfile) -> Result<Vec<DeploymentRecord>, StoreError> {
        Ok(self.networks.get(network.name()).cloned().map(latest).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;
    use std::collections::BTreeMap;
    use yaxis_manifest::Manifest;

    fn profile(name: &str) -> NetworkProfile {
        Manifest::yaxis().select(Some(name), &BTreeMap::<String, String>::new()).unwrap()
    }

    fn names(records: &[DeploymentRecord]) -> Vec<&str> {
        records.iter().map(DeploymentRecord::name).collect()
    }

    #[test]
    fn latest_keeps_first_position() {
        let records = latest([
            DeploymentRecord::new("Vault", Address::repeat_byte(1)),
            DeploymentRecord::new("Controller", Address::repeat_byte(2)),
            DeploymentRecord::new("Vault", Address::repeat_byte(3)),
        ]);
        assert_eq!(names(&records), ["Vault", "Controller"]);
        assert_eq!(records[0].address(), Address::repeat_byte(3));
    }

    #[test]
    fn memory_store() {
        let store = MemoryStore::new()
            .with_record("hardhat", DeploymentRecord::new("YAXIS", Address::repeat_byte(1)))
            .with_record("hardhat", DeploymentRecord::new("Manager", Address::repeat_byte(2)));

        assert_eq!(names(&store.records(&profile("hardhat")).unwrap()), ["YAXIS", "Manager"]);
        assert!(store.records(&profile("mainnet")).unwrap().is_empty());
    }

    fn write(dir: &Path, file: &str, json: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(file), json).unwrap();
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nothing-here"));
        assert!(store.records(&profile("hardhat")).unwrap().is_empty());
    }

    #[test]
    fn reads_per_contract_files_in_deployment_order() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("hardhat");
        write(&network, CHAIN_ID_FILE, "31337");
        write(
            &network,
            "Vault.json",
            r#"{ "address": "0x3333333333333333333333333333333333333333",
                 "receipt": { "blockNumber": 5, "transactionIndex": 1 } }"#,
        );
        write(
            &network,
            "Manager.json",
            r#"{ "address": "0x1111111111111111111111111111111111111111",
                 "receipt": { "blockNumber": 2, "transactionIndex": 0 } }"#,
        );
        write(
            &network,
            "Controller.json",
            r#"{ "address": "0x2222222222222222222222222222222222222222",
                 "receipt": { "blockNumber": 5, "transactionIndex": 0 } }"#,
        );
        write(
            &network,
            "Imported.json",
            r#"{ "address": "0x4444444444444444444444444444444444444444" }"#,
        );
        write(&network, ".migrations.json", "{}");
        write(&network, "README.md", "not a record");
        write(&network.join("solcInputs"), "abc.json", "{}");

        let records = FileStore::new(dir.path()).records(&profile("hardhat")).unwrap();
        assert_eq!(names(&records), ["Manager", "Controller", "Vault", "Imported"]);
        assert_eq!(records[2].address(), Address::repeat_byte(0x33));
    }

    #[test]
    fn unreadable_store() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the network directory should be.
        fs::write(dir.path().join("hardhat"), "").unwrap();
        let err = FileStore::new(dir.path()).records(&profile("hardhat")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn bad_record() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("hardhat");
        write(&network, "A.json", r#"{ "address": "0x0000000000000000000000000000000000000000" }"#);
        write(&network, "B.json", "{ not json");

        let err = FileStore::new(dir.path()).records(&profile("hardhat")).unwrap_err();
        assert!(matches!(err, StoreError::Decode { ref path, .. } if path.ends_with("B.json")));
    }

    #[test]
    fn chain_marker() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("mainnet");
        fs::create_dir_all(&network).unwrap();
        let store = FileStore::new(dir.path());

        fs::write(network.join(CHAIN_ID_FILE), "1\n").unwrap();
        assert!(store.records(&profile("mainnet")).unwrap().is_empty());

        fs::write(network.join(CHAIN_ID_FILE), "31337").unwrap();
        assert!(matches!(
            store.records(&profile("mainnet")),
            Err(StoreError::ChainIdMismatch { recorded: 31337, expected: 1, .. })
        ));

        fs::write(network.join(CHAIN_ID_FILE), "one").unwrap();
        assert!(matches!(store.records(&profile("mainnet")), Err(StoreError::BadChainId { .. })));
    }
}
