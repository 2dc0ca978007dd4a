//! Constants for the test manifest.

use alloy::primitives::Address;

/// Name of the remote test network.
pub const TEST_NETWORK: &str = "remote";
/// Chain ID of the remote test network.
pub const TEST_CHAIN_ID: u64 = 1;

/// Environment variable holding the remote test endpoint.
pub const RPC_URL_VAR: &str = "TEST_RPC_URL";
/// Environment variable holding the remote test signer key.
pub const PRIVATE_KEY_VAR: &str = "TEST_PRIVATE_KEY";
/// Environment variable holding the test deployer address.
pub const DEPLOYER_VAR: &str = "TEST_DEPLOYER";

/// Treasury address on the remote test network.
pub const TREASURY: Address = Address::repeat_byte(0x11);
/// Node-managed signer, second slot of the remote test network.
pub const REMOTE_SIGNER: Address = Address::repeat_byte(0x22);
/// Vault address, shared by two roles.
pub const VAULT: Address = Address::repeat_byte(0x33);
/// Pool address on the remote test network.
pub const POOL: Address = Address::repeat_byte(0x44);
/// Pool id attribute of the pool role.
pub const POOL_ID: u64 = 7;

/// Private key of the first local development account.
pub const LOCAL_KEY_0: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// A small manifest exercising every binding kind.
pub const TEST_MANIFEST: &str = r#"{
    "defaultNetwork": "hardhat",
    "networks": {
        "hardhat": { "chainId": 31337 },
        "remote": {
            "chainId": 1,
            "url": { "env": "TEST_RPC_URL" },
            "accounts": [
                { "env": "TEST_PRIVATE_KEY" },
                "0x2222222222222222222222222222222222222222"
            ]
        }
    },
    "namedAccounts": {
        "treasury": { "1": "0x1111111111111111111111111111111111111111", "default": 0 },
        "deployer": { "1": { "env": "TEST_DEPLOYER" }, "default": 0 },
        "operator": { "default": 1 },
        "vault": {
            "1": "0x3333333333333333333333333333333333333333",
            "31337": "0x3333333333333333333333333333333333333333"
        },
        "vaultAlias": { "1": "0x3333333333333333333333333333333333333333" },
        "pool": { "1": "0x4444444444444444444444444444444444444444", "poolId": 7 }
    }
}"#;
