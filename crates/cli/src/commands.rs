use std::io::Write;
use tracing::{info, warn};
use yaxis_deployments::{write_report, DeploymentStore, Reporter};
use yaxis_manifest::{EnvSource, Manifest, NetworkProfile, SignerSlot};

/// Print the deployed contract addresses for the network.
pub(crate) fn contracts<S: DeploymentStore>(
    store: &S,
    profile: &NetworkProfile,
    out: impl Write,
) -> eyre::Result<()> {
    let deployments = Reporter::new(store, profile).list_deployments()?;
    if deployments.is_empty() {
        info!(network = profile.name(), "no deployments recorded");
    }
    write_report(out, &deployments)?;
    Ok(())
}

/// Print every role with its resolved value.
pub(crate) fn roles(
    manifest: &Manifest,
    profile: &NetworkProfile,
    env: &impl EnvSource,
    unresolved_only: bool,
    mut out: impl Write,
) -> eyre::Result<()> {
    let resolution = manifest.resolve(profile, env);
    for (name, value) in resolution.iter() {
        if unresolved_only && value.is_resolved() {
            continue;
        }
        writeln!(out, "{name} {value}")?;
    }

    let unresolved = resolution.unresolved().count();
    if unresolved > 0 {
        warn!(network = profile.name(), unresolved, "some roles did not resolve");
    }
    Ok(())
}

/// Print the selected network profile and the tooling settings.
pub(crate) fn network(
    manifest: &Manifest,
    profile: &NetworkProfile,
    env: &impl EnvSource,
    mut out: impl Write,
) -> eyre::Result<()> {
    writeln!(out, "network: {}", profile.name())?;
    writeln!(out, "chain id: {}", profile.chain_id())?;
    match profile.endpoint() {
        Some(url) => writeln!(out, "endpoint: {url}")?,
        None if profile.is_in_process() => writeln!(out, "endpoint: in-process")?,
        None => writeln!(out, "endpoint: unset")?,
    }
    if let Some(timeout) = profile.timeout() {
        writeln!(out, "timeout: {}ms", timeout.as_millis())?;
    }
    if let Some(mining) = profile.mining() {
        write!(out, "mining: auto={}", mining.auto)?;
        match mining.interval {
            Some(interval) => writeln!(out, " interval={interval}ms")?,
            None => writeln!(out)?,
        }
    }

    let usable = profile.available_signers().count();
    writeln!(out, "signers: {usable} usable of {}", profile.signers().len())?;
    for (index, slot) in profile.signers().iter().enumerate() {
        match slot {
            SignerSlot::Available(address) => writeln!(out, "  {index} {address}")?,
            SignerSlot::Missing { var } => writeln!(out, "  {index} missing ${var}")?,
            SignerSlot::Invalid { var: Some(var) } => writeln!(out, "  {index} invalid ${var}")?,
            SignerSlot::Invalid { var: None } => writeln!(out, "  {index} invalid")?,
        }
    }

    let api_key = if manifest.etherscan().api_key(env).is_some() { "set" } else { "unset" };
    writeln!(out, "etherscan api key: {api_key}")?;
    for compiler in &manifest.solidity().compilers {
        let optimizer = compiler.settings.optimizer;
        if optimizer.enabled {
            writeln!(out, "solidity: {} (optimizer, {} runs)", compiler.version, optimizer.runs)?;
        } else {
            writeln!(out, "solidity: {}", compiler.version)?;
        }
    }
    if let Some(vyper) = manifest.vyper() {
        writeln!(out, "vyper: {}", vyper.version)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use yaxis_deployments::FileStore;
    use yaxis_test_utils::{env, fake_record, write_deployments};

    fn run(f: impl FnOnce(&mut Vec<u8>) -> eyre::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn contracts_prints_deployment_order() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("hardhat");
        fs::create_dir_all(&network).unwrap();
        fs::write(
            network.join("YaxisToken.json"),
            r#"{ "address": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
                 "receipt": { "blockNumber": 1, "transactionIndex": 0 } }"#,
        )
        .unwrap();
        fs::write(
            network.join("Manager.json"),
            r#"{ "address": "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512",
                 "receipt": { "blockNumber": 2, "transactionIndex": 0 } }"#,
        )
        .unwrap();

        let manifest = Manifest::yaxis();
        let profile = manifest.select(None, &env(&[])).unwrap();
        let store = FileStore::new(dir.path());
        let output = run(|out| contracts(&store, &profile, out));
        assert_eq!(
            output,
            "YaxisToken 0x5FbDB2315678afecb367f032d93F642f64180aa3\n\
             Manager 0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512\n"
        );
    }

    #[test]
    fn contracts_fails_on_corrupt_store() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("hardhat");
        fs::create_dir_all(&network).unwrap();
        fs::write(network.join("Manager.json"), "garbage\n").unwrap();

        let manifest = Manifest::yaxis();
        let profile = manifest.select(None, &env(&[])).unwrap();
        let store = FileStore::new(dir.path());
        assert!(contracts(&store, &profile, Vec::new()).is_err());
    }

    #[test]
    fn contracts_ignores_a_broken_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        write_deployments(dir.path(), "mainnet", 1, &[fake_record("Manager", 0x01)]).unwrap();

        let manifest = Manifest::yaxis();
        let env = env(&[("MAINNET_RPC_URL", "not a url")]);
        let profile = manifest.select(Some("mainnet"), &env).unwrap();
        assert_eq!(profile.endpoint(), None);

        let store = FileStore::new(dir.path());
        let output = run(|out| contracts(&store, &profile, out));
        assert_eq!(output, "Manager 0x0101010101010101010101010101010101010101\n");
    }

    #[test]
    fn roles_unresolved_only() {
        let manifest = Manifest::yaxis();
        let env = env(&[]);
        let profile = manifest.select(Some("mainnet"), &env).unwrap();
        let output = run(|out| roles(&manifest, &profile, &env, true, out));

        let names: Vec<_> = output.lines().map(|l| l.split(' ').next().unwrap()).collect();
        assert_eq!(names, ["deployer", "insurancePool", "treasury"]);
    }

    #[test]
    fn network_summary() {
        let manifest = Manifest::yaxis();
        let env = env(&[]);
        let profile = manifest.select(Some("mainnet"), &env).unwrap();
        let output = run(|out| network(&manifest, &profile, &env, out));
        assert!(output.starts_with("network: mainnet\nchain id: 1\nendpoint: unset\n"));
        assert!(output.contains("signers: 0 usable of 1\n  0 missing $MAINNET_PRIVATE_KEY\n"));
        assert!(output.contains("etherscan api key: unset\n"));
        assert!(output.contains("solidity: 0.8.14 (optimizer, 200 runs)\n"));
        assert!(output.ends_with("vyper: 0.2.8\n"));
    }
}
