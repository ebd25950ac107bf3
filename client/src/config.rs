use std::{fs, path::Path, path::PathBuf};

use casper_types::{ContractHash, ContractPackageHash, HashAddr, Key, PublicKey, SecretKey, U512};
use serde::{Deserialize, Serialize};

use crate::{
    args::Cep47InstallArgs,
    constants::DEFAULT_PAYMENT_AMOUNT,
    error::{Cep47Error, Result},
};

fn default_payment_amount() -> u64 {
    DEFAULT_PAYMENT_AMOUNT
}

/// Connection settings for a [`crate::Cep47Client`], usually read from a
/// TOML file:
///
/// ```toml
/// node_address = "http://localhost:11101"
/// chain_name = "casper-net-1"
/// contract_hash = "hash-0101..."
/// secret_key_path = "keys/secret_key.pem"
/// payment_amount = 5000000000
///
/// [install]
/// name = "collection"
/// contract_name = "collection_contract"
/// symbol = "COL"
/// meta = { origin = "config" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub node_address: String,
    pub chain_name: String,
    #[serde(default)]
    pub contract_hash: Option<String>,
    #[serde(default)]
    pub contract_package_hash: Option<String>,
    #[serde(default)]
    pub secret_key_path: Option<PathBuf>,
    #[serde(default = "default_payment_amount")]
    pub payment_amount: u64,
    /// Install arguments, overridable from the command line.
    #[serde(default)]
    pub install: Option<Cep47InstallArgs>,
}

impl ClientConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|error| Cep47Error::Config(error.to_string()))
    }

    pub fn payment_amount(&self) -> U512 {
        U512::from(self.payment_amount)
    }

    pub fn contract_hash(&self) -> Result<Option<ContractHash>> {
        self.contract_hash
            .as_deref()
            .map(|hash| {
                parse_hash_addr(hash, |hash| {
                    ContractHash::from_formatted_str(hash).map(|hash| hash.value())
                })
                .map(ContractHash::new)
            })
            .transpose()
    }

    pub fn contract_package_hash(&self) -> Result<Option<ContractPackageHash>> {
        self.contract_package_hash
            .as_deref()
            .map(|hash| {
                parse_hash_addr(hash, |hash| {
                    ContractPackageHash::from_formatted_str(hash).map(|hash| hash.value())
                })
                .map(ContractPackageHash::new)
            })
            .transpose()
    }

    /// Loads the PEM secret key and derives the sending account from it.
    pub fn signer(&self) -> Result<(SecretKey, PublicKey)> {
        let path = self
            .secret_key_path
            .as_ref()
            .ok_or_else(|| Cep47Error::Config("`secret_key_path` is not set".to_string()))?;
        let secret_key = SecretKey::from_file(path)
            .map_err(|error| Cep47Error::InvalidKey(format!("{}: {error:?}", path.display())))?;
        let public_key = PublicKey::from(&secret_key);
        Ok((secret_key, public_key))
    }
}

/// Accepts either the `hash-<hex>` form printed for keys or the typed
/// form (`contract-<hex>`, `contract-package-wasm<hex>`).
fn parse_hash_addr<E: std::fmt::Debug>(
    formatted: &str,
    typed: impl FnOnce(&str) -> std::result::Result<HashAddr, E>,
) -> Result<HashAddr> {
    if let Some(hash_addr) = Key::from_formatted_str(formatted)
        .ok()
        .and_then(Key::into_hash)
    {
        return Ok(hash_addr);
    }
    typed(formatted).map_err(|error| Cep47Error::InvalidKey(format!("{formatted}: {error:?}")))
}
