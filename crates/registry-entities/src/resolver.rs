//! Resolution of a project list's owning registry from on-chain state.

use std::fmt::Debug;

use alloy::{
    primitives::{Address, Bytes},
    sol,
    sol_types::SolCall,
};
use thiserror::Error;
use tracing::error;

sol! {
    contract OwnableProjectList {
        function projectRegistry() external view returns (address);
    }
}

/// Looks up the registry a project list belongs to.
pub trait RegistryResolver {
    type Error: Debug;

    fn project_registry(&self, list: Address) -> Result<Address, Self::Error>;
}

/// Synchronous read-only contract call against ledger state, i.e. the host's
/// `eth_call` at the block being indexed.
pub trait LedgerReader {
    type Error: Debug;

    fn call(&self, to: Address, data: Bytes) -> Result<Bytes, Self::Error>;
}

#[derive(Debug, Error)]
pub enum LedgerError<E> {
    #[error("Ledger read failed: {0:?}")]
    Read(E),
    #[error("Failed to decode projectRegistry() return data: {0}")]
    Decode(#[from] alloy::sol_types::Error),
}

/// [`RegistryResolver`] that calls `projectRegistry()` on the list contract.
#[derive(Debug, Clone)]
pub struct ContractRegistryResolver<L> {
    reader: L,
}

impl<L: LedgerReader> ContractRegistryResolver<L> {
    pub fn new(reader: L) -> Self {
        Self { reader }
    }
}

impl<L: LedgerReader> RegistryResolver for ContractRegistryResolver<L> {
    type Error = LedgerError<L::Error>;

    fn project_registry(&self, list: Address) -> Result<Address, Self::Error> {
        let calldata = OwnableProjectList::projectRegistryCall {}.abi_encode();
        let output = self
            .reader
            .call(list, calldata.into())
            .map_err(LedgerError::Read)?;

        let registry = OwnableProjectList::projectRegistryCall::abi_decode_returns(&output)
            .map_err(|e| {
                error!("Invalid projectRegistry() output from {}: {}", list, e);
                e
            })?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use alloy::{primitives::address, sol_types::SolValue};

    use super::*;

    const LIST: Address = address!("0x00000000000000000000000000000000000000aa");
    const REGISTRY: Address = address!("0x0000000000000000000000000000000000000002");

    struct FixedReader(Bytes);

    impl LedgerReader for FixedReader {
        type Error = ();

        fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ()> {
            assert_eq!(to, LIST);
            assert_eq!(
                data.as_ref(),
                OwnableProjectList::projectRegistryCall::SELECTOR.as_slice()
            );
            Ok(self.0.clone())
        }
    }

    struct FailingReader;

    impl LedgerReader for FailingReader {
        type Error = &'static str;

        fn call(&self, _to: Address, _data: Bytes) -> Result<Bytes, Self::Error> {
            Err("contract not found")
        }
    }

    #[test]
    fn test_resolves_registry() {
        let resolver = ContractRegistryResolver::new(FixedReader(REGISTRY.abi_encode().into()));
        assert_eq!(resolver.project_registry(LIST).unwrap(), REGISTRY);
    }

    #[test]
    fn test_read_failure() {
        let resolver = ContractRegistryResolver::new(FailingReader);
        let err = resolver.project_registry(LIST).unwrap_err();
        assert!(matches!(err, LedgerError::Read("contract not found")));
    }

    #[test]
    fn test_short_output() {
        let resolver = ContractRegistryResolver::new(FixedReader(Bytes::from_static(&[0u8; 4])));
        let err = resolver.project_registry(LIST).unwrap_err();
        assert!(matches!(err, LedgerError::Decode(_)));
    }
}
