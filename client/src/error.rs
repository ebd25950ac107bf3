use casper_types::{bytesrepr, CLValueError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Cep47Error>;

#[derive(Debug, Error)]
pub enum Cep47Error {
    /// The dictionary entry exists but holds `None`, e.g. the owner of a burnt token.
    #[error("no value in dictionary `{dictionary_name}` for item key `{dictionary_item_key}`")]
    EntryAbsent {
        dictionary_name: String,
        dictionary_item_key: String,
    },
    #[error(transparent)]
    Rpc(#[from] casper_client::Error),
    #[error("failed to decode `{name}`: {error}")]
    Decode { name: String, error: CLValueError },
    #[error("invalid runtime argument `{name}`: {error}")]
    InvalidArgument { name: String, error: CLValueError },
    #[error("failed to encode value: {0}")]
    Encode(bytesrepr::Error),
    #[error("stored value at `{0}` is not a CLValue")]
    UnexpectedStoredValue(String),
    #[error("node returned no state root hash")]
    MissingStateRootHash,
    #[error("contract hash has not been set")]
    MissingContractHash,
    #[error("at least one signing key is required")]
    MissingSigningKey,
    #[error("failed to build deploy: {0}")]
    BuildDeploy(String),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<bytesrepr::Error> for Cep47Error {
    fn from(error: bytesrepr::Error) -> Self {
        Cep47Error::Encode(error)
    }
}
