use casper_types::{CLValue, Key, U256};
use cep47_client::{
    constants::{ARG_RECIPIENT, ARG_TOKEN_IDS, ARG_TOKEN_METAS, ENTRY_POINT_MINT},
    Cep47Error, Meta, Session,
};

use crate::utility::{
    constants::{ACCOUNT_USER_1, ACCOUNT_USER_2},
    in_memory_node::Revert,
    support::{self, TestAccount},
};

#[tokio::test]
async fn should_set_owner_of_minted_tokens_to_recipient() {
    let (client, installer) = support::install_contract().await;
    let recipient = TestAccount::new(ACCOUNT_USER_1);

    support::mint_tokens(&client, &installer, recipient.key(), &[1, 2]).await;

    for token_id in [1u64, 2] {
        let owner = client.get_owner_of(U256::from(token_id)).await.unwrap();
        assert_eq!(owner, recipient.formatted_account_hash());
        assert!(owner.starts_with("account-hash-"));
    }
}

#[tokio::test]
async fn mint_should_increment_balance_and_total_supply() {
    let (client, installer) = support::install_contract().await;
    let recipient = TestAccount::new(ACCOUNT_USER_1);

    support::mint_tokens(&client, &installer, recipient.key(), &[10]).await;
    assert_eq!(client.balance_of(&recipient.public_key).await.unwrap(), "1");

    support::mint_tokens(&client, &installer, recipient.key(), &[11, 12]).await;
    assert_eq!(client.balance_of(&recipient.public_key).await.unwrap(), "3");
    assert_eq!(client.total_supply().await.unwrap(), U256::from(3u64));
}

#[tokio::test]
async fn mint_should_index_tokens_per_owner() {
    let (client, installer) = support::install_contract().await;
    let recipient = TestAccount::new(ACCOUNT_USER_1);

    support::mint_tokens(&client, &installer, recipient.key(), &[5, 7]).await;

    assert_eq!(
        client
            .get_token_by_index(&recipient.public_key, U256::zero())
            .await
            .unwrap(),
        "5"
    );
    assert_eq!(
        client
            .get_token_by_index(&recipient.public_key, U256::one())
            .await
            .unwrap(),
        "7"
    );
    assert_eq!(
        client
            .get_index_by_token(recipient.key(), U256::from(7u64))
            .await
            .unwrap(),
        "1"
    );
}

#[tokio::test]
async fn index_lookups_should_be_inverse_of_each_other() {
    let (client, installer) = support::install_contract().await;
    let recipient = TestAccount::new(ACCOUNT_USER_1);
    support::mint_tokens(&client, &installer, recipient.key(), &[3, 9, 4]).await;

    for index in 0u64..3 {
        let token_id = client
            .get_token_by_index(&recipient.public_key, U256::from(index))
            .await
            .unwrap();
        let token_id = U256::from_dec_str(&token_id).unwrap();
        let round_trip = client
            .get_index_by_token(recipient.key(), token_id)
            .await
            .unwrap();
        assert_eq!(round_trip, index.to_string());
    }
}

#[tokio::test]
async fn should_encode_mint_runtime_args() {
    let (client, installer) = support::install_contract().await;
    let recipient = TestAccount::new(ACCOUNT_USER_1);
    let token_metas = vec![support::test_token_meta(1)];

    let deploy_hash = client
        .mint(
            recipient.key(),
            &support::token_ids(&[1]),
            &token_metas,
            support::payment(),
            &installer.public_key,
            installer.keys(),
        )
        .await
        .unwrap();

    let executed = client.node().executed_deploy(&deploy_hash);
    let (entry_point, args) = match executed.session {
        Session::Call {
            entry_point, args, ..
        } => (entry_point, args),
        other => panic!("expected a contract call, got {:?}", other),
    };
    assert_eq!(entry_point, ENTRY_POINT_MINT);
    assert_eq!(
        args.get(ARG_RECIPIENT),
        Some(&CLValue::from_t(recipient.key()).unwrap())
    );
    assert_eq!(
        args.get(ARG_TOKEN_IDS),
        Some(&CLValue::from_t(vec![U256::one()]).unwrap())
    );
    assert_eq!(
        args.get(ARG_TOKEN_METAS),
        Some(&CLValue::from_t(token_metas).unwrap())
    );
}

#[tokio::test]
async fn should_not_mint_existing_token_id() {
    let (client, installer) = support::install_contract().await;
    let first_owner = TestAccount::new(ACCOUNT_USER_1);
    let second_owner = TestAccount::new(ACCOUNT_USER_2);
    support::mint_tokens(&client, &installer, first_owner.key(), &[1]).await;

    let deploy_hash = client
        .mint(
            second_owner.key(),
            &support::token_ids(&[1]),
            &[Meta::new()],
            support::payment(),
            &installer.public_key,
            installer.keys(),
        )
        .await
        .unwrap();

    support::assert_deploy_reverted(&client, &deploy_hash, Revert::TokenIdAlreadyExists);
    assert_eq!(
        client.get_owner_of(U256::one()).await.unwrap(),
        first_owner.formatted_account_hash()
    );
    assert_eq!(client.total_supply().await.unwrap(), U256::one());
}

#[tokio::test]
async fn should_only_allow_installer_to_mint() {
    let (client, _) = support::install_contract().await;
    let stranger = TestAccount::new(ACCOUNT_USER_1);

    let deploy_hash = client
        .mint(
            stranger.key(),
            &support::token_ids(&[1]),
            &[Meta::new()],
            support::payment(),
            &stranger.public_key,
            stranger.keys(),
        )
        .await
        .unwrap();

    support::assert_deploy_reverted(&client, &deploy_hash, Revert::PermissionDenied);
    assert_eq!(client.total_supply().await.unwrap(), U256::zero());
}

#[tokio::test]
async fn should_reject_deploy_without_signing_keys() {
    let (client, installer) = support::install_contract().await;

    let error = client
        .mint(
            installer.key(),
            &support::token_ids(&[1]),
            &[Meta::new()],
            support::payment(),
            &installer.public_key,
            &[],
        )
        .await
        .unwrap_err();

    assert!(matches!(error, Cep47Error::MissingSigningKey));
}

#[tokio::test]
async fn should_revert_when_token_metas_do_not_match_token_ids() {
    let (client, installer) = support::install_contract().await;
    let recipient = TestAccount::new(ACCOUNT_USER_1);

    let deploy_hash = client
        .mint(
            recipient.key(),
            &support::token_ids(&[1, 2]),
            &[support::test_token_meta(1)],
            support::payment(),
            &installer.public_key,
            installer.keys(),
        )
        .await
        .unwrap();

    support::assert_deploy_reverted(&client, &deploy_hash, Revert::MismatchedTokenMetas);
    assert_eq!(client.total_supply().await.unwrap(), U256::zero());
}

#[tokio::test]
async fn should_report_contract_owner_with_hash_prefix() {
    let (client, installer) = support::install_contract().await;
    let holder = Key::Hash([0xabu8; 32]);

    support::mint_tokens(&client, &installer, holder, &[5]).await;

    assert_eq!(
        client.get_owner_of(U256::from(5u64)).await.unwrap(),
        format!("hash-{}", "ab".repeat(32))
    );
}
