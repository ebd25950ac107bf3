use async_trait::async_trait;
use casper_client::types::DeployHash;
use casper_types::{
    bytesrepr::Bytes, CLValue, ContractHash, PublicKey, RuntimeArgs, SecretKey, U512,
};

use crate::error::Result;

/// What a deploy executes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Session {
    /// Installs the contract from compiled Wasm.
    Install {
        module_bytes: Bytes,
        args: RuntimeArgs,
    },
    /// Calls an entry point of an installed contract.
    Call {
        contract_hash: ContractHash,
        entry_point: String,
        args: RuntimeArgs,
    },
}

impl Session {
    pub fn args(&self) -> &RuntimeArgs {
        match self {
            Session::Install { args, .. } | Session::Call { args, .. } => args,
        }
    }

    /// The entry point called, `call` for an install session.
    pub fn entry_point(&self) -> &str {
        match self {
            Session::Install { .. } => "call",
            Session::Call { entry_point, .. } => entry_point,
        }
    }
}

/// Everything a node needs to build, sign and submit one deploy.
pub struct DeployRequest<'a> {
    pub chain_name: &'a str,
    pub session: Session,
    pub payment_amount: U512,
    pub sender: &'a PublicKey,
    pub keys: &'a [SecretKey],
}

/// The operations the contract client needs from a Casper node.
///
/// Every method is a single request/response round trip; implementations
/// surface transport failures unchanged.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Reads the value stored under `name` in the contract's named keys.
    async fn query_named_value(&self, contract_hash: ContractHash, name: &str) -> Result<CLValue>;

    /// Reads one item of a dictionary owned by the contract.
    async fn query_dictionary_item(
        &self,
        contract_hash: ContractHash,
        dictionary_name: &str,
        dictionary_item_key: &str,
    ) -> Result<CLValue>;

    /// Signs and submits a deploy, returning its hash.
    async fn put_deploy(&self, request: DeployRequest<'_>) -> Result<DeployHash>;
}
