use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use casper_client::{
    get_dictionary_item, get_state_root_hash, put_deploy, query_global_state,
    rpcs::{DictionaryItemIdentifier, GlobalStateIdentifier},
    types::{Deploy, DeployBuilder, DeployHash, ExecutableDeployItem, StoredValue},
    JsonRpcId, Verbosity,
};
use casper_hashing::Digest;
use casper_types::{CLValue, ContractHash, Key};
use tracing::{debug, info};

use crate::{
    error::{Cep47Error, Result},
    node::{DeployRequest, NodeClient, Session},
};

/// A [`NodeClient`] talking JSON-RPC to a Casper node.
#[derive(Debug)]
pub struct CasperNode {
    node_address: String,
    next_rpc_id: AtomicI64,
}

impl CasperNode {
    pub fn new(node_address: &str) -> Self {
        CasperNode {
            node_address: node_address.to_string(),
            next_rpc_id: AtomicI64::new(1),
        }
    }

    pub fn node_address(&self) -> &str {
        &self.node_address
    }

    fn rpc_id(&self) -> JsonRpcId {
        JsonRpcId::Number(self.next_rpc_id.fetch_add(1, Ordering::Relaxed))
    }

    async fn latest_state_root_hash(&self) -> Result<Digest> {
        get_state_root_hash(self.rpc_id(), &self.node_address, Verbosity::Low, None)
            .await?
            .result
            .state_root_hash
            .ok_or(Cep47Error::MissingStateRootHash)
    }
}

/// Unwraps a queried value, failing for accounts, contracts and other
/// non-`CLValue` entries.
pub fn into_cl_value(stored_value: StoredValue, path: &str) -> Result<CLValue> {
    match stored_value {
        StoredValue::CLValue(cl_value) => Ok(cl_value),
        _ => Err(Cep47Error::UnexpectedStoredValue(path.to_string())),
    }
}

fn into_executable_deploy_item(session: Session) -> ExecutableDeployItem {
    match session {
        Session::Install { module_bytes, args } => {
            ExecutableDeployItem::ModuleBytes { module_bytes, args }
        }
        Session::Call {
            contract_hash,
            entry_point,
            args,
        } => ExecutableDeployItem::StoredContractByHash {
            hash: contract_hash,
            entry_point,
            args,
        },
    }
}

/// Builds and signs the deploy for `request` without contacting a node.
///
/// The first key signs while building, the remaining keys are added as
/// further approvals. The deploy is paid for by `request.sender` with
/// standard payment.
pub fn build_deploy(request: DeployRequest<'_>) -> Result<Deploy> {
    let (signer, other_signers) = request
        .keys
        .split_first()
        .ok_or(Cep47Error::MissingSigningKey)?;

    let session = into_executable_deploy_item(request.session);
    let mut deploy = DeployBuilder::new(request.chain_name, session, signer)
        .with_account(request.sender.clone())
        .with_standard_payment(request.payment_amount)
        .build()
        .map_err(|error| Cep47Error::BuildDeploy(error.to_string()))?;
    for key in other_signers {
        deploy.sign(key);
    }
    Ok(deploy)
}

#[async_trait]
impl NodeClient for CasperNode {
    async fn query_named_value(&self, contract_hash: ContractHash, name: &str) -> Result<CLValue> {
        let state_root_hash = self.latest_state_root_hash().await?;
        debug!(%contract_hash, name, "querying contract named key");

        let stored_value = query_global_state(
            self.rpc_id(),
            &self.node_address,
            Verbosity::Low,
            GlobalStateIdentifier::StateRootHash(state_root_hash),
            Key::from(contract_hash),
            vec![name.to_string()],
        )
        .await?
        .result
        .stored_value;

        into_cl_value(stored_value, name)
    }

    async fn query_dictionary_item(
        &self,
        contract_hash: ContractHash,
        dictionary_name: &str,
        dictionary_item_key: &str,
    ) -> Result<CLValue> {
        let state_root_hash = self.latest_state_root_hash().await?;
        debug!(
            %contract_hash,
            dictionary_name,
            dictionary_item_key,
            "querying contract dictionary"
        );

        let identifier = DictionaryItemIdentifier::ContractNamedKey {
            key: Key::from(contract_hash).to_formatted_string(),
            dictionary_name: dictionary_name.to_string(),
            dictionary_item_key: dictionary_item_key.to_string(),
        };
        let stored_value = get_dictionary_item(
            self.rpc_id(),
            &self.node_address,
            Verbosity::Low,
            state_root_hash,
            identifier,
        )
        .await?
        .result
        .stored_value;

        into_cl_value(stored_value, dictionary_name)
    }

    async fn put_deploy(&self, request: DeployRequest<'_>) -> Result<DeployHash> {
        let entry_point = request.session.entry_point().to_string();
        let deploy = build_deploy(request)?;

        let deploy_hash = put_deploy(self.rpc_id(), &self.node_address, Verbosity::Low, deploy)
            .await?
            .result
            .deploy_hash;
        info!(
            %deploy_hash,
            %entry_point,
            node_address = %self.node_address,
            "deploy submitted"
        );
        Ok(deploy_hash)
    }
}
