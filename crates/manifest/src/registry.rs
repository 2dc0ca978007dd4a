use crate::{EnvSource, ManifestError, NetworkProfile, ResolvedValue, Role, SignerSlot};
use alloy::primitives::Address;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// The role table of a manifest.
///
/// The table is an immutable snapshot shared behind an [`Arc`]. Resolution
/// reads it and the environment, and never changes either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    roles: Arc<IndexMap<String, Role>>,
}

impl Registry {
    /// Build a registry, rejecting roles that share a name.
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Result<Self, ManifestError> {
        let mut map = IndexMap::new();
        for role in roles {
            let name = role.name().to_string();
            if map.insert(name.clone(), role).is_some() {
                return Err(ManifestError::DuplicateRole(name));
            }
        }
        Ok(Self { roles: Arc::new(map) })
    }

    /// Number of declared roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// True if no roles are declared.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Look up a role by name.
    pub fn get(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    /// All roles, in manifest order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> + '_ {
        self.roles.values()
    }

    /// Resolve every role on a chain.
    ///
    /// Roles that cannot be resolved are recorded as
    /// [`ResolvedValue::Unresolved`]; they never stop the pass.
    pub fn resolve(
        &self,
        chain_id: u64,
        signers: &[SignerSlot],
        env: &impl EnvSource,
    ) -> Resolution {
        let values: IndexMap<_, _> = self
            .roles
            .iter()
            .map(|(name, role)| (name.clone(), role.resolve(chain_id, signers, env)))
            .collect();

        let resolution = Resolution { chain_id, values };
        let unresolved = resolution.unresolved().count();
        if unresolved > 0 {
            debug!(chain_id, unresolved, total = resolution.len(), "partially resolved roles");
        }
        resolution
    }

    /// Resolve every role for a network profile.
    pub fn resolve_profile(&self, profile: &NetworkProfile, env: &impl EnvSource) -> Resolution {
        self.resolve(profile.chain_id(), profile.signers(), env)
    }

    /// Resolve a single role. Unlike an unresolved value, an undeclared role
    /// name is an error.
    pub fn resolve_role(
        &self,
        name: &str,
        profile: &NetworkProfile,
        env: &impl EnvSource,
    ) -> Result<ResolvedValue, ManifestError> {
        let role = self.get(name).ok_or_else(|| ManifestError::UnknownRole(name.to_string()))?;
        let value = role.resolve(profile.chain_id(), profile.signers(), env);
        if let ResolvedValue::Unresolved(reason) = &value {
            warn!(role = name, network = profile.name(), %reason, "role unresolved");
        }
        Ok(value)
    }
}

/// The result of resolving every role on one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    chain_id: u64,
    values: IndexMap<String, ResolvedValue>,
}

impl Resolution {
    /// The chain the roles were resolved on.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Number of roles.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if there are no roles.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The resolved value of a role.
    pub fn get(&self, name: &str) -> Option<&ResolvedValue> {
        self.values.get(name)
    }

    /// The resolved address of a role, if any.
    pub fn address_of(&self, name: &str) -> Option<Address> {
        self.get(name).and_then(ResolvedValue::address)
    }

    /// All roles and their values, in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedValue)> + '_ {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Roles that did not resolve.
    pub fn unresolved(&self) -> impl Iterator<Item = (&str, &ResolvedValue)> + '_ {
        self.iter().filter(|(_, value)| !value.is_resolved())
    }

    /// Every role that resolved to `address`. Several roles may share one
    /// address.
    pub fn roles_for(&self, address: Address) -> impl Iterator<Item = &str> + '_ {
        self.iter().filter(move |(_, value)| value.address() == Some(address)).map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chains::local::LOCAL_SIGNERS, SecretRef, UnresolvedReason};
    use alloy::primitives::address;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    const POOL: Address = address!("0x5a6A4D54456819380173272A5E8E9B9904BdF41B");

    fn no_env() -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn local() -> Vec<SignerSlot> {
        LOCAL_SIGNERS.iter().copied().map(SignerSlot::Available).collect()
    }

    fn registry() -> Registry {
        Registry::new([
            Role::new("MIMCRV").with_binding(1, POOL),
            Role::new("stableSwapMIMPool").with_binding(1, POOL),
            Role::new("treasury").with_binding(1, SecretRef::new("DEPLOYER_ADDRESS")),
            Role::new("insurancePool").with_default(4),
        ])
        .unwrap()
    }

    #[test]
    fn duplicate_role_rejected() {
        let err = Registry::new([Role::new("CRV"), Role::new("CRV")]).unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateRole(name) if name == "CRV"));
    }

    #[test]
    fn partial_resolution() {
        let resolution = registry().resolve(1, &[], &no_env());
        assert_eq!(resolution.len(), 4);
        assert_eq!(resolution.address_of("MIMCRV"), Some(POOL));
        assert_eq!(
            resolution.get("treasury"),
            Some(&ResolvedValue::Unresolved(UnresolvedReason::MissingSecret {
                var: "DEPLOYER_ADDRESS".into()
            }))
        );
        assert_eq!(
            resolution.unresolved().map(|(name, _)| name).collect::<Vec<_>>(),
            ["treasury", "insurancePool"]
        );
    }

    #[test]
    fn shared_addresses_are_legitimate() {
        let resolution = registry().resolve(1, &[], &no_env());
        assert_eq!(resolution.roles_for(POOL).collect::<Vec<_>>(), ["MIMCRV", "stableSwapMIMPool"]);
    }

    #[test]
    fn default_signer_on_local_chain() {
        let resolution = registry().resolve(31337, &local(), &no_env());
        assert_eq!(
            resolution.get("insurancePool"),
            Some(&ResolvedValue::Signer { index: 4, address: LOCAL_SIGNERS[4] })
        );
        assert_eq!(
            resolution.get("MIMCRV"),
            Some(&ResolvedValue::Unresolved(UnresolvedReason::NoBinding))
        );
    }

    proptest! {
        #[test]
        fn resolution_is_deterministic(
            chain_id in prop_oneof![Just(1u64), Just(42), Just(31337), any::<u64>()],
            deployer in proptest::option::of("0x[0-9a-f]{40}"),
            signers in 0usize..=10,
        ) {
            let env: BTreeMap<String, String> = deployer
                .into_iter()
                .map(|value| ("DEPLOYER_ADDRESS".to_string(), value))
                .collect();
            let all = local();
            let slots = &all[..signers];
            let registry = registry();
            let first = registry.resolve(chain_id, slots, &env);
            let second = registry.resolve(chain_id, slots, &env);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn explicit_binding_wins(
            bytes in any::<[u8; 20]>(),
            default in 0usize..10,
            chain_id in any::<u64>(),
        ) {
            let address = Address::from(bytes);
            let role = Role::new("r").with_default(default).with_binding(chain_id, address);
            let registry = Registry::new([role]).unwrap();
            let resolution = registry.resolve(chain_id, &local(), &no_env());
            prop_assert_eq!(resolution.get("r"), Some(&ResolvedValue::Address(address)));
        }

        #[test]
        fn default_index_picks_signer(index in 0usize..20, signers in 0usize..=10) {
            let role = Role::new("fund").with_default(index);
            let registry = Registry::new([role]).unwrap();
            let all = local();
            let slots = &all[..signers];
            let value = registry.resolve(1, slots, &no_env()).get("fund").cloned().unwrap();
            if index < signers {
                prop_assert_eq!(value, ResolvedValue::Signer { index, address: LOCAL_SIGNERS[index] });
            } else {
                prop_assert_eq!(
                    value,
                    ResolvedValue::Unresolved(UnresolvedReason::SignerOutOfRange { index, available: signers })
                );
            }
        }
    }
}
