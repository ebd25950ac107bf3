use casper_types::U256;
use cep47_client::{constants::ALLOWANCES, Cep47Error};

use crate::utility::{
    constants::{ACCOUNT_USER_1, ACCOUNT_USER_2},
    in_memory_node::Revert,
    support::{self, TestAccount},
};

#[tokio::test]
async fn should_record_spender_as_allowance() {
    let (client, installer) = support::install_contract().await;
    let owner = TestAccount::new(ACCOUNT_USER_1);
    let spender = TestAccount::new(ACCOUNT_USER_2);
    support::mint_tokens(&client, &installer, owner.key(), &[1, 2]).await;

    let deploy_hash = client
        .approve(
            spender.key(),
            &support::token_ids(&[1, 2]),
            support::payment(),
            &owner.public_key,
            owner.keys(),
        )
        .await
        .unwrap();
    support::assert_deploy_succeeded(&client, &deploy_hash);

    for token_id in [1u64, 2] {
        assert_eq!(
            client
                .get_allowance(owner.key(), U256::from(token_id))
                .await
                .unwrap(),
            spender.formatted_account_hash()
        );
    }
}

#[tokio::test]
async fn should_not_approve_token_of_another_owner() {
    let (client, installer) = support::install_contract().await;
    let owner = TestAccount::new(ACCOUNT_USER_1);
    let stranger = TestAccount::new(ACCOUNT_USER_2);
    support::mint_tokens(&client, &installer, owner.key(), &[1]).await;

    let deploy_hash = client
        .approve(
            stranger.key(),
            &support::token_ids(&[1]),
            support::payment(),
            &stranger.public_key,
            stranger.keys(),
        )
        .await
        .unwrap();

    support::assert_deploy_reverted(&client, &deploy_hash, Revert::PermissionDenied);
}

#[tokio::test]
async fn approved_spender_should_burn_on_behalf_of_owner() {
    let (client, installer) = support::install_contract().await;
    let owner = TestAccount::new(ACCOUNT_USER_1);
    let spender = TestAccount::new(ACCOUNT_USER_2);
    support::mint_tokens(&client, &installer, owner.key(), &[1]).await;
    client
        .approve(
            spender.key(),
            &support::token_ids(&[1]),
            support::payment(),
            &owner.public_key,
            owner.keys(),
        )
        .await
        .unwrap();

    let deploy_hash = client
        .burn(
            owner.key(),
            &support::token_ids(&[1]),
            support::payment(),
            &spender.public_key,
            spender.keys(),
        )
        .await
        .unwrap();
    support::assert_deploy_succeeded(&client, &deploy_hash);

    match client.get_allowance(owner.key(), U256::one()).await {
        Err(Cep47Error::EntryAbsent {
            dictionary_name, ..
        }) => assert_eq!(dictionary_name, ALLOWANCES),
        other => panic!("expected a cleared allowance, got {:?}", other),
    }
}
