pub const ARG_NAME: &str = "name";
pub const ARG_CONTRACT_NAME: &str = "contract_name";
pub const ARG_SYMBOL: &str = "symbol";
pub const ARG_META: &str = "meta";

pub const ARG_RECIPIENT: &str = "recipient";
pub const ARG_SENDER: &str = "sender";
pub const ARG_SPENDER: &str = "spender";
pub const ARG_OWNER: &str = "owner";
pub const ARG_TOKEN_ID: &str = "token_id";
pub const ARG_TOKEN_IDS: &str = "token_ids";
pub const ARG_TOKEN_META: &str = "token_meta";
pub const ARG_TOKEN_METAS: &str = "token_metas";

// Named keys holding plain values under the contract.
pub const NAME: &str = "name";
pub const SYMBOL: &str = "symbol";
pub const META: &str = "meta";
pub const TOTAL_SUPPLY: &str = "total_supply";

// Dictionaries. Every value is stored as an `Option<T>`; burnt or revoked
// entries are written back as `None`.
pub const BALANCES: &str = "balances";
pub const OWNERS: &str = "owners";
pub const METADATA: &str = "metadata";
pub const OWNED_TOKENS_BY_INDEX: &str = "owned_tokens_by_index";
pub const OWNED_INDEXES_BY_TOKEN: &str = "owned_indexes_by_token";
pub const ALLOWANCES: &str = "allowances";

pub const ENTRY_POINT_MINT: &str = "mint";
pub const ENTRY_POINT_BURN: &str = "burn";
pub const ENTRY_POINT_APPROVE: &str = "approve";
pub const ENTRY_POINT_TRANSFER: &str = "transfer";
pub const ENTRY_POINT_TRANSFER_FROM: &str = "transfer_from";
pub const ENTRY_POINT_UPDATE_TOKEN_META: &str = "update_token_meta";

pub const DEFAULT_PAYMENT_AMOUNT: u64 = 5_000_000_000;
