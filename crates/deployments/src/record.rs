use alloy::primitives::{Address, B256};
use serde_json::{Map, Value};

/// Where the deploying transaction landed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentReceipt {
    /// Account that sent the deploying transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// Block the contract was deployed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Index of the deploying transaction within its block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_index: Option<u64>,
}

/// A deployed contract, as recorded by the deployment tooling.
///
/// The serialized form is the per-contract file written by hardhat-deploy.
/// The contract name is not part of it: it is the file's name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// Contract name.
    #[serde(skip)]
    name: String,
    /// Deployed address.
    address: Address,
    /// Hash of the deploying transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transaction_hash: Option<B256>,
    /// Receipt of the deploying transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    receipt: Option<DeploymentReceipt>,
    /// Everything else the tooling recorded (abi, args, bytecode, ...).
    /// Passed through untouched.
    #[serde(flatten)]
    metadata: Map<String, Value>,
}

impl DeploymentRecord {
    /// Create a record with no transaction details.
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            address,
            transaction_hash: None,
            receipt: None,
            metadata: Map::new(),
        }
    }

    /// Set the deploying transaction and its position in the chain.
    pub fn with_transaction(
        mut self,
        hash: B256,
        block_number: u64,
        transaction_index: u64,
    ) -> Self {
        self.transaction_hash = Some(hash);
        let receipt = self.receipt.get_or_insert_with(Default::default);
        receipt.block_number = Some(block_number);
        receipt.transaction_index = Some(transaction_index);
        self
    }

    /// Set the deploying account.
    pub fn with_deployer(mut self, deployer: Address) -> Self {
        self.receipt.get_or_insert_with(Default::default).from = Some(deployer);
        self
    }

    pub(crate) fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Contract name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deployed address.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Hash of the deploying transaction.
    pub const fn transaction_hash(&self) -> Option<B256> {
        self.transaction_hash
    }

    /// Receipt of the deploying transaction.
    pub const fn receipt(&self) -> Option<&DeploymentReceipt> {
        self.receipt.as_ref()
    }

    /// Block the contract was deployed in.
    pub fn block_number(&self) -> Option<u64> {
        self.receipt.and_then(|r| r.block_number)
    }

    /// Account that sent the deploying transaction.
    pub fn deployer(&self) -> Option<Address> {
        self.receipt.and_then(|r| r.from)
    }

    /// Position of the deploying transaction: block number, then index in
    /// the block.
    pub fn position(&self) -> Option<(u64, u64)> {
        let receipt = self.receipt?;
        Some((receipt.block_number?, receipt.transaction_index.unwrap_or_default()))
    }

    /// Extra recorded fields.
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn reads_hardhat_deploy_file() {
        let json = r#"{
            "address": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "abi": [],
            "transactionHash": "0x1111111111111111111111111111111111111111111111111111111111111111",
            "receipt": {
                "to": null,
                "from": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
                "contractAddress": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
                "transactionIndex": 2,
                "gasUsed": "0x1",
                "blockNumber": 12,
                "status": 1
            },
            "args": ["0x0000000000000000000000000000000000000000"],
            "numDeployments": 1
        }"#;
        let record = serde_json::from_str::<DeploymentRecord>(json).unwrap().named("YaxisToken");

        assert_eq!(record.name(), "YaxisToken");
        assert_eq!(record.address(), address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert_eq!(record.transaction_hash(), Some(B256::repeat_byte(0x11)));
        assert_eq!(
            record.deployer(),
            Some(address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"))
        );
        assert_eq!(record.position(), Some((12, 2)));
        assert_eq!(record.metadata()["numDeployments"], 1);
        assert!(record.metadata().contains_key("abi"));
    }

    #[test]
    fn address_only() {
        let record: DeploymentRecord =
            serde_json::from_str(r#"{ "address": "0x5FbDB2315678afecb367f032d93F642f64180aa3" }"#)
                .unwrap();
        assert_eq!(record.position(), None);
        assert_eq!(record.deployer(), None);
        assert!(serde_json::from_str::<DeploymentRecord>(r#"{ "abi": [] }"#).is_err());
    }
}
