use std::collections::BTreeMap;

use casper_types::{bytesrepr::ToBytes, CLTyped, Key, RuntimeArgs, U256};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        ARG_CONTRACT_NAME, ARG_META, ARG_NAME, ARG_OWNER, ARG_RECIPIENT, ARG_SENDER, ARG_SPENDER,
        ARG_SYMBOL, ARG_TOKEN_ID, ARG_TOKEN_IDS, ARG_TOKEN_META, ARG_TOKEN_METAS,
    },
    error::{Cep47Error, Result},
};

pub type TokenId = U256;
pub type Meta = BTreeMap<String, String>;

/// Arguments passed to the installer session exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cep47InstallArgs {
    pub name: String,
    pub contract_name: String,
    pub symbol: String,
    #[serde(default)]
    pub meta: Meta,
}

impl Cep47InstallArgs {
    pub fn new(name: &str, contract_name: &str, symbol: &str, meta: Meta) -> Self {
        Cep47InstallArgs {
            name: name.to_string(),
            contract_name: contract_name.to_string(),
            symbol: symbol.to_string(),
            meta,
        }
    }

    /// Fails with [`Cep47Error::Config`] naming the first empty field.
    pub fn ensure_complete(&self) -> Result<()> {
        for (field, value) in [
            (ARG_NAME, &self.name),
            (ARG_CONTRACT_NAME, &self.contract_name),
            (ARG_SYMBOL, &self.symbol),
        ] {
            if value.is_empty() {
                return Err(Cep47Error::Config(format!("install `{field}` is not set")));
            }
        }
        Ok(())
    }

    pub fn to_runtime_args(&self) -> Result<RuntimeArgs> {
        RuntimeArgsBuilder::default()
            .insert(ARG_NAME, self.name.clone())?
            .insert(ARG_CONTRACT_NAME, self.contract_name.clone())?
            .insert(ARG_SYMBOL, self.symbol.clone())?
            .insert(ARG_META, self.meta.clone())
            .map(RuntimeArgsBuilder::build)
    }
}

/// Parses a token id or index from its decimal form.
pub fn parse_token_id(token_id: &str) -> Result<TokenId> {
    U256::from_dec_str(token_id)
        .map_err(|error| Cep47Error::InvalidNumber(format!("{token_id}: {error:?}")))
}

/// Thin wrapper over `RuntimeArgs::insert` which tags conversion failures
/// with the offending argument name.
#[derive(Default)]
struct RuntimeArgsBuilder {
    runtime_args: RuntimeArgs,
}

impl RuntimeArgsBuilder {
    fn insert<T: CLTyped + ToBytes>(mut self, name: &str, value: T) -> Result<Self> {
        self.runtime_args
            .insert(name, value)
            .map_err(|error| Cep47Error::InvalidArgument {
                name: name.to_string(),
                error,
            })?;
        Ok(self)
    }

    fn build(self) -> RuntimeArgs {
        self.runtime_args
    }
}

pub fn approve_args(spender: Key, token_ids: &[TokenId]) -> Result<RuntimeArgs> {
    RuntimeArgsBuilder::default()
        .insert(ARG_SPENDER, spender)?
        .insert(ARG_TOKEN_IDS, token_ids.to_vec())
        .map(RuntimeArgsBuilder::build)
}

pub fn mint_args(
    recipient: Key,
    token_ids: &[TokenId],
    token_metas: &[Meta],
) -> Result<RuntimeArgs> {
    RuntimeArgsBuilder::default()
        .insert(ARG_RECIPIENT, recipient)?
        .insert(ARG_TOKEN_IDS, token_ids.to_vec())?
        .insert(ARG_TOKEN_METAS, token_metas.to_vec())
        .map(RuntimeArgsBuilder::build)
}

pub fn burn_args(owner: Key, token_ids: &[TokenId]) -> Result<RuntimeArgs> {
    RuntimeArgsBuilder::default()
        .insert(ARG_OWNER, owner)?
        .insert(ARG_TOKEN_IDS, token_ids.to_vec())
        .map(RuntimeArgsBuilder::build)
}

pub fn transfer_args(recipient: Key, token_ids: &[TokenId]) -> Result<RuntimeArgs> {
    RuntimeArgsBuilder::default()
        .insert(ARG_RECIPIENT, recipient)?
        .insert(ARG_TOKEN_IDS, token_ids.to_vec())
        .map(RuntimeArgsBuilder::build)
}

pub fn transfer_from_args(
    sender: Key,
    recipient: Key,
    token_ids: &[TokenId],
) -> Result<RuntimeArgs> {
    RuntimeArgsBuilder::default()
        .insert(ARG_SENDER, sender)?
        .insert(ARG_RECIPIENT, recipient)?
        .insert(ARG_TOKEN_IDS, token_ids.to_vec())
        .map(RuntimeArgsBuilder::build)
}

pub fn update_token_meta_args(token_id: TokenId, token_meta: &Meta) -> Result<RuntimeArgs> {
    RuntimeArgsBuilder::default()
        .insert(ARG_TOKEN_ID, token_id)?
        .insert(ARG_TOKEN_META, token_meta.clone())
        .map(RuntimeArgsBuilder::build)
}
