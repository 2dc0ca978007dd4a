use crate::{
    entries::Entries, parse_address, Binding, EnvSource, ManifestError, ResolvedValue, SecretRef,
    SignerSlot, UnresolvedReason,
};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Key holding a role's default signer index.
const DEFAULT_KEY: &str = "default";

/// A named participant or external contract.
///
/// A role carries explicit per-chain bindings, a default signer index, or
/// both. An explicit binding always takes precedence over the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Unique role name.
    name: String,
    /// Explicit bindings, keyed by chain id.
    bindings: BTreeMap<u64, Binding>,
    /// Signer index used on chains without an explicit binding.
    default: Option<usize>,
    /// Extra keys that take no part in resolution, such as `poolId`.
    attributes: BTreeMap<String, Value>,
}

impl Role {
    /// Create a role with no bindings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: BTreeMap::new(),
            default: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Bind the role on a chain, replacing any previous binding there.
    pub fn with_binding(mut self, chain_id: u64, binding: impl Into<Binding>) -> Self {
        self.bindings.insert(chain_id, binding.into());
        self
    }

    /// Set the default signer index.
    pub fn with_default(mut self, index: usize) -> Self {
        self.default = Some(index);
        self
    }

    /// Attach an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Parse a role from its manifest entries.
    pub(crate) fn from_entries(name: String, entries: Entries<Value>) -> Result<Self, ManifestError> {
        if let Some(key) = entries.first_duplicate_by(str::to_string) {
            return Err(ManifestError::DuplicateKey {
                scope: format!("role {name}"),
                key: key.to_string(),
            });
        }

        let mut role = Self::new(name);
        for (key, value) in entries {
            match RoleKey::parse(&role.name, &key)? {
                RoleKey::Default => {
                    role.default = Some(signer_index(&value, || format!("role {}", role.name))?);
                }
                RoleKey::Chain(chain_id) => {
                    let binding = binding_from_value(&role.name, chain_id, value)?;
                    role.bindings.insert(chain_id, binding);
                }
                RoleKey::Attribute => {
                    role.attributes.insert(key, value);
                }
            }
        }
        Ok(role)
    }

    /// The role name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The explicit binding for a chain, if any.
    pub fn binding(&self, chain_id: u64) -> Option<&Binding> {
        self.bindings.get(&chain_id)
    }

    /// All explicit bindings, ordered by chain id.
    pub fn bindings(&self) -> impl Iterator<Item = (u64, &Binding)> + '_ {
        self.bindings.iter().map(|(id, b)| (*id, b))
    }

    /// The default signer index, if any.
    pub const fn default_signer(&self) -> Option<usize> {
        self.default
    }

    /// An extra attribute by key.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// The pool id attribute carried by pool-backed roles.
    pub fn pool_id(&self) -> Option<u64> {
        self.attribute("poolId").and_then(Value::as_u64)
    }

    /// Resolve the role on a chain.
    ///
    /// An explicit binding for the chain is used as-is, even when it fails to
    /// resolve. Only roles without a binding fall back to the default signer.
    pub fn resolve(
        &self,
        chain_id: u64,
        signers: &[SignerSlot],
        env: &impl EnvSource,
    ) -> ResolvedValue {
        match (self.bindings.get(&chain_id), self.default.as_ref()) {
            (Some(Binding::Address(address)), _) => ResolvedValue::Address(*address),
            (Some(Binding::Secret(secret)), _) => self.resolve_secret(secret, env),
            (Some(Binding::Signer(index)), _) | (None, Some(index)) => signer_at(signers, *index),
            (None, None) => UnresolvedReason::NoBinding.into(),
        }
    }

    fn resolve_secret(&self, secret: &SecretRef, env: &impl EnvSource) -> ResolvedValue {
        let var = secret.var();
        let Some(raw) = env.var(var) else {
            return UnresolvedReason::MissingSecret { var: var.to_string() }.into();
        };
        match parse_address(&raw) {
            Some(address) => ResolvedValue::Address(address),
            None => {
                warn!(role = %self.name, var, "secret does not hold an address");
                UnresolvedReason::MalformedSecret { var: var.to_string() }.into()
            }
        }
    }
}

/// The meaning of a key inside a role object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleKey {
    Default,
    Chain(u64),
    Attribute,
}

impl RoleKey {
    /// Chain keys are canonical decimal: digits only, no sign, no leading
    /// zero. Anything else that looks like a number is rejected rather than
    /// kept as an attribute.
    fn parse(role: &str, key: &str) -> Result<Self, ManifestError> {
        if key == DEFAULT_KEY {
            return Ok(Self::Default);
        }
        let unsigned = key.strip_prefix(['+', '-']).unwrap_or(key);
        if !unsigned.starts_with(|c: char| c.is_ascii_digit()) {
            return Ok(Self::Attribute);
        }

        let canonical =
            key.bytes().all(|b| b.is_ascii_digit()) && (key == "0" || !key.starts_with('0'));
        canonical.then(|| key.parse().ok()).flatten().map(Self::Chain).ok_or_else(|| {
            ManifestError::InvalidChainKey { context: format!("role {role}"), key: key.to_string() }
        })
    }
}

/// Look up a signer by index.
fn signer_at(signers: &[SignerSlot], index: usize) -> ResolvedValue {
    match signers.get(index) {
        Some(SignerSlot::Available(address)) => ResolvedValue::Signer { index, address: *address },
        Some(_) => UnresolvedReason::SignerUnavailable { index }.into(),
        None => UnresolvedReason::SignerOutOfRange { index, available: signers.len() }.into(),
    }
}

fn signer_index(value: &Value, context: impl FnOnce() -> String) -> Result<usize, ManifestError> {
    value.as_u64().and_then(|i| usize::try_from(i).ok()).ok_or_else(|| {
        ManifestError::InvalidSignerIndex { context: context(), value: value.to_string() }
    })
}

fn binding_from_value(role: &str, chain_id: u64, value: Value) -> Result<Binding, ManifestError> {
    let context = || format!("role {role} on chain {chain_id}");
    match value {
        Value::String(s) => parse_address(&s)
            .map(Binding::Address)
            .ok_or_else(|| ManifestError::malformed_address(context(), s)),
        Value::Number(_) => signer_index(&value, context).map(Binding::Signer),
        Value::Object(_) => serde_json::from_value::<SecretRef>(value.clone())
            .map(Binding::Secret)
            .map_err(|_| ManifestError::malformed_address(context(), value.to_string())),
        other => Err(ManifestError::malformed_address(context(), other.to_string())),
    }
}
