//! Constants for Ethereum mainnet.

use alloy::primitives::{address, Address};

/// Name of the mainnet network.
pub const NETWORK: &str = "mainnet";
/// Chain ID for Ethereum mainnet.
pub const CHAIN_ID: u64 = 1;

/// Environment variable holding the mainnet JSON-RPC endpoint.
pub const RPC_URL_VAR: &str = "MAINNET_RPC_URL";
/// Environment variable holding the mainnet signer private key.
pub const PRIVATE_KEY_VAR: &str = "MAINNET_PRIVATE_KEY";
/// Environment variable holding the deployer (and treasury) address.
pub const DEPLOYER_ADDRESS_VAR: &str = "DEPLOYER_ADDRESS";
/// Environment variable holding the block explorer API key.
pub const ETHERSCAN_API_KEY_VAR: &str = "ETHERSCAN_API_KEY";

/// USDC token on mainnet.
pub const USDC: Address = address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
/// USDT token on mainnet.
pub const USDT: Address = address!("0xdAC17F958D2ee523a2206206994597C13D831ec7");
/// DAI token on mainnet.
pub const DAI: Address = address!("0x6B175474E89094C44Da98b954EedeAC495271d0F");
/// WETH token on mainnet.
pub const WETH: Address = address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
/// Curve 3pool swap contract on mainnet.
pub const STABLE_SWAP_3POOL: Address = address!("0xbEbc44782C7dB0a1A60Cb6fe97d0b483032FF1C7");
/// yAxis multisig on mainnet.
pub const MULTISIG: Address = address!("0xC1d40e197563dF727a4d3134E8BD1DeF4B498C6f");
