use casper_hashing::Digest;
use casper_types::{bytesrepr::ToBytes, Key, PublicKey};

use crate::{args::TokenId, error::Result};

/// Dictionary item key for the `balances` dictionary: the bare hex of the
/// owner's account hash, without the `account-hash-` prefix.
pub fn balance_item_key(owner: &PublicKey) -> String {
    hex::encode(owner.to_account_hash().value())
}

/// Dictionary item key for dictionaries keyed by a single token.
pub fn token_item_key(token_id: &TokenId) -> String {
    token_id.to_string()
}

/// Hex encoded blake2b-256 digest of `owner.to_bytes() ++ value.to_bytes()`.
///
/// The contract derives the keys of `owned_tokens_by_index`,
/// `owned_indexes_by_token` and `allowances` this way, so the encoding of
/// both operands must match what the contract hashes byte for byte.
pub fn hashed_item_key<A: ToBytes, B: ToBytes>(owner: &A, value: &B) -> Result<String> {
    let mut preimage = owner.to_bytes()?;
    preimage.extend(value.to_bytes()?);
    Ok(hex::encode(Digest::hash(preimage).value()))
}

/// Renders a stored owner or spender. Accounts come out as `account-hash-<hex>`,
/// contract holders keep their own prefix (`hash-<hex>`).
pub fn format_account_key(key: &Key) -> String {
    key.to_formatted_string()
}
