//! Constants for the in-process local development chain.

use alloy::primitives::{address, Address};

/// Name of the in-process local network. Always present in a loaded manifest.
pub const LOCAL_NETWORK: &str = "hardhat";
/// Name of the local node network reached over JSON-RPC.
pub const LOCALHOST_NETWORK: &str = "localhost";
/// Chain ID reserved for local development chains.
pub const LOCAL_CHAIN_ID: u64 = 31337;
/// Endpoint used by the `localhost` network when none is configured.
pub const LOCALHOST_URL: &str = "http://127.0.0.1:8545";

/// Mining interval of the in-process chain, in milliseconds.
pub const LOCAL_MINING_INTERVAL: u64 = 1000;

/// The development accounts available on every local chain, in signer order.
///
/// These are derived from the well-known development mnemonic
/// `test test test test test test test test test test test junk`.
pub const LOCAL_SIGNERS: [Address; 10] = [
    address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
    address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"),
    address!("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"),
    address!("0x90F79bf6EB2c4f870365E785982E1f101E93b906"),
    address!("0x15d34AAf54267DB7D7c367839AAf71A00a2C6A65"),
    address!("0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc"),
    address!("0x976EA74026E726554dB657fA54763abd0C3a0aa9"),
    address!("0x14dC79964da2C08b23698B3D3cc7Ca32193d9955"),
    address!("0x23618e81E3f5cdF7f54C3d65f7FBc0aBf5B21E8f"),
    address!("0xa0Ee7A142d267C1f36714E4a8F75612F20a79720"),
];
