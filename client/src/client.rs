use casper_client::types::DeployHash;
use casper_types::{
    bytesrepr::{Bytes, FromBytes},
    CLTyped, CLValue, ContractHash, ContractPackageHash, Key, PublicKey, RuntimeArgs, SecretKey,
    U256, U512,
};
use tracing::debug;

use crate::{
    args::{self, Cep47InstallArgs, Meta, TokenId},
    constants::{
        ALLOWANCES, BALANCES, ENTRY_POINT_APPROVE, ENTRY_POINT_BURN, ENTRY_POINT_MINT,
        ENTRY_POINT_TRANSFER, ENTRY_POINT_TRANSFER_FROM, ENTRY_POINT_UPDATE_TOKEN_META, META,
        METADATA, NAME, OWNED_INDEXES_BY_TOKEN, OWNED_TOKENS_BY_INDEX, OWNERS, SYMBOL,
        TOTAL_SUPPLY,
    },
    dictionary::{balance_item_key, format_account_key, hashed_item_key, token_item_key},
    error::{Cep47Error, Result},
    node::{DeployRequest, NodeClient, Session},
    rpc::CasperNode,
};

fn decode<T: CLTyped + FromBytes>(cl_value: CLValue, name: &str) -> Result<T> {
    cl_value.into_t().map_err(|error| Cep47Error::Decode {
        name: name.to_string(),
        error,
    })
}

/// Client for one CEP-47 contract.
///
/// Holds the node, the network name and, once attached, the contract
/// identity. Nothing else is shared between calls.
pub struct Cep47Client<N = CasperNode> {
    node: N,
    network_name: String,
    contract_hash: Option<ContractHash>,
    contract_package_hash: Option<ContractPackageHash>,
}

impl Cep47Client<CasperNode> {
    pub fn new(node_address: &str, network_name: &str) -> Self {
        Cep47Client::with_node(CasperNode::new(node_address), network_name)
    }
}

impl<N: NodeClient> Cep47Client<N> {
    pub fn with_node(node: N, network_name: &str) -> Self {
        Cep47Client {
            node,
            network_name: network_name.to_string(),
            contract_hash: None,
            contract_package_hash: None,
        }
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    pub fn set_contract_hash(
        &mut self,
        contract_hash: ContractHash,
        contract_package_hash: Option<ContractPackageHash>,
    ) {
        self.contract_hash = Some(contract_hash);
        self.contract_package_hash = contract_package_hash;
    }

    pub fn contract_hash(&self) -> Option<ContractHash> {
        self.contract_hash
    }

    pub fn contract_package_hash(&self) -> Option<ContractPackageHash> {
        self.contract_package_hash
    }

    fn attached_contract_hash(&self) -> Result<ContractHash> {
        self.contract_hash.ok_or(Cep47Error::MissingContractHash)
    }

    pub async fn install(
        &self,
        wasm: Vec<u8>,
        args: &Cep47InstallArgs,
        payment_amount: U512,
        sender: &PublicKey,
        keys: &[SecretKey],
    ) -> Result<DeployHash> {
        let session = Session::Install {
            module_bytes: Bytes::from(wasm),
            args: args.to_runtime_args()?,
        };
        self.node
            .put_deploy(DeployRequest {
                chain_name: &self.network_name,
                session,
                payment_amount,
                sender,
                keys,
            })
            .await
    }

    async fn query_named<T: CLTyped + FromBytes>(&self, name: &str) -> Result<T> {
        let contract_hash = self.attached_contract_hash()?;
        let cl_value = self.node.query_named_value(contract_hash, name).await?;
        decode(cl_value, name)
    }

    pub async fn name(&self) -> Result<String> {
        self.query_named(NAME).await
    }

    pub async fn symbol(&self) -> Result<String> {
        self.query_named(SYMBOL).await
    }

    pub async fn meta(&self) -> Result<Meta> {
        self.query_named(META).await
    }

    pub async fn total_supply(&self) -> Result<U256> {
        self.query_named(TOTAL_SUPPLY).await
    }

    /// Reads a dictionary item stored as `Option<T>`, failing with
    /// [`Cep47Error::EntryAbsent`] when it holds `None`.
    async fn query_dictionary<T: CLTyped + FromBytes>(
        &self,
        dictionary_name: &str,
        dictionary_item_key: String,
    ) -> Result<T> {
        let contract_hash = self.attached_contract_hash()?;
        let cl_value = self
            .node
            .query_dictionary_item(contract_hash, dictionary_name, &dictionary_item_key)
            .await?;

        match decode::<Option<T>>(cl_value, dictionary_name)? {
            Some(value) => Ok(value),
            None => {
                debug!(dictionary_name, %dictionary_item_key, "dictionary entry absent");
                Err(Cep47Error::EntryAbsent {
                    dictionary_name: dictionary_name.to_string(),
                    dictionary_item_key,
                })
            }
        }
    }

    pub async fn balance_of(&self, account: &PublicKey) -> Result<String> {
        let balance: U256 = self
            .query_dictionary(BALANCES, balance_item_key(account))
            .await?;
        Ok(balance.to_string())
    }

    pub async fn get_owner_of(&self, token_id: TokenId) -> Result<String> {
        let owner: Key = self
            .query_dictionary(OWNERS, token_item_key(&token_id))
            .await?;
        Ok(format_account_key(&owner))
    }

    pub async fn get_token_meta(&self, token_id: TokenId) -> Result<Meta> {
        self.query_dictionary(METADATA, token_item_key(&token_id))
            .await
    }

    pub async fn get_token_by_index(&self, owner: &PublicKey, index: U256) -> Result<String> {
        let owner = Key::Account(owner.to_account_hash());
        let item_key = hashed_item_key(&owner, &index)?;
        let token_id: TokenId = self
            .query_dictionary(OWNED_TOKENS_BY_INDEX, item_key)
            .await?;
        Ok(token_id.to_string())
    }

    pub async fn get_index_by_token(&self, owner: Key, token_id: TokenId) -> Result<String> {
        let item_key = hashed_item_key(&owner, &token_id)?;
        let index: U256 = self
            .query_dictionary(OWNED_INDEXES_BY_TOKEN, item_key)
            .await?;
        Ok(index.to_string())
    }

    /// The allowances key hashes the token id in its string form, unlike the
    /// index dictionaries which hash it as a `U256`.
    pub async fn get_allowance(&self, owner: Key, token_id: TokenId) -> Result<String> {
        let item_key = hashed_item_key(&owner, &token_item_key(&token_id))?;
        let spender: Key = self.query_dictionary(ALLOWANCES, item_key).await?;
        Ok(format_account_key(&spender))
    }

    async fn call_entry_point(
        &self,
        entry_point: &str,
        runtime_args: RuntimeArgs,
        payment_amount: U512,
        sender: &PublicKey,
        keys: &[SecretKey],
    ) -> Result<DeployHash> {
        let contract_hash = self.attached_contract_hash()?;
        debug!(%contract_hash, entry_point, "calling contract entry point");
        let session = Session::Call {
            contract_hash,
            entry_point: entry_point.to_string(),
            args: runtime_args,
        };
        self.node
            .put_deploy(DeployRequest {
                chain_name: &self.network_name,
                session,
                payment_amount,
                sender,
                keys,
            })
            .await
    }

    pub async fn approve(
        &self,
        spender: Key,
        token_ids: &[TokenId],
        payment_amount: U512,
        sender: &PublicKey,
        keys: &[SecretKey],
    ) -> Result<DeployHash> {
        let runtime_args = args::approve_args(spender, token_ids)?;
        self.call_entry_point(ENTRY_POINT_APPROVE, runtime_args, payment_amount, sender, keys)
            .await
    }

    pub async fn mint(
        &self,
        recipient: Key,
        token_ids: &[TokenId],
        token_metas: &[Meta],
        payment_amount: U512,
        sender: &PublicKey,
        keys: &[SecretKey],
    ) -> Result<DeployHash> {
        let runtime_args = args::mint_args(recipient, token_ids, token_metas)?;
        self.call_entry_point(ENTRY_POINT_MINT, runtime_args, payment_amount, sender, keys)
            .await
    }

    pub async fn burn(
        &self,
        owner: Key,
        token_ids: &[TokenId],
        payment_amount: U512,
        sender: &PublicKey,
        keys: &[SecretKey],
    ) -> Result<DeployHash> {
        let runtime_args = args::burn_args(owner, token_ids)?;
        self.call_entry_point(ENTRY_POINT_BURN, runtime_args, payment_amount, sender, keys)
            .await
    }

    pub async fn transfer(
        &self,
        recipient: Key,
        token_ids: &[TokenId],
        payment_amount: U512,
        sender: &PublicKey,
        keys: &[SecretKey],
    ) -> Result<DeployHash> {
        let runtime_args = args::transfer_args(recipient, token_ids)?;
        self.call_entry_point(ENTRY_POINT_TRANSFER, runtime_args, payment_amount, sender, keys)
            .await
    }

    /// Moves tokens out of `owner`'s account on behalf of an approved spender.
    pub async fn transfer_from(
        &self,
        owner: Key,
        recipient: Key,
        token_ids: &[TokenId],
        payment_amount: U512,
        sender: &PublicKey,
        keys: &[SecretKey],
    ) -> Result<DeployHash> {
        let runtime_args = args::transfer_from_args(owner, recipient, token_ids)?;
        self.call_entry_point(
            ENTRY_POINT_TRANSFER_FROM,
            runtime_args,
            payment_amount,
            sender,
            keys,
        )
        .await
    }

    pub async fn update_token_meta(
        &self,
        token_id: TokenId,
        token_meta: &Meta,
        payment_amount: U512,
        sender: &PublicKey,
        keys: &[SecretKey],
    ) -> Result<DeployHash> {
        let runtime_args = args::update_token_meta_args(token_id, token_meta)?;
        self.call_entry_point(
            ENTRY_POINT_UPDATE_TOKEN_META,
            runtime_args,
            payment_amount,
            sender,
            keys,
        )
        .await
    }
}
