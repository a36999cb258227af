//! Registry IDs
//!
//! Deterministic string identifiers for the project registry entities. Every
//! key is built from canonical address fragments and decimal project ids,
//! joined with [`SEPARATOR`]. The same inputs always produce the same key, so
//! replayed events resolve to the records they created the first time.

use alloy::primitives::{Address, U256};

pub mod keys;

pub use keys::{KeyParseError, ListKey, MembershipKey, ProjectKey, RegistryKey};

/// Joins key fragments. Never produced by a canonical address or a decimal
/// integer, so composite keys split back into their parts unambiguously.
pub const SEPARATOR: char = '-';

pub const ADDRESS_PREFIX: &str = "0x";

/// Hex digits in a canonical address, excluding the prefix.
pub const ADDRESS_HEX_LEN: usize = 40;

/// Marks an address-typed field that has not been observed on-chain yet.
pub const ZERO_ADDRESS: Address = Address::ZERO;

/// Renders `address` as `0x` followed by 40 lowercase hex digits.
pub fn canonical_address(address: Address) -> String {
    format!("{:#x}", address)
}

/// Joins already-canonical fragments with [`SEPARATOR`].
pub fn join<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(part.as_ref());
    }
    out
}

pub fn registry_key(registry: Address) -> String {
    canonical_address(registry)
}

/// `<registry>-<project id in decimal>`
pub fn project_key(registry: Address, project_id: U256) -> String {
    // U256's Display is plain base-10 with no padding or sign.
    join([canonical_address(registry), project_id.to_string()])
}

pub fn list_key(list: Address) -> String {
    canonical_address(list)
}

/// `<registry>-<project id>-<list>`
pub fn membership_key(registry: Address, project_id: U256, list: Address) -> String {
    join([project_key(registry, project_id), canonical_address(list)])
}
