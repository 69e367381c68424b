//! Live tests against a running Canopy node.
//!
//! Requires:
//! 1. A node with its query API reachable at `CANOPY_QUERY_URL`
//! 2. For the submission tests, a funded key in `CANOPY_TEST_PRIVATE_KEY`
//!    (hex) on the curve named by `CANOPY_TEST_CURVE` (default `ED25519`)
//!
//! Values may come from a `.env` file. Tests return early when the
//! variables are unset.
//!
//! Run: cargo test --test node_integration -- --nocapture --ignored

use canopy_swap_sdk::prelude::*;
use std::env;

// ============================================================================
// Test Helpers
// ============================================================================

fn client_from_env() -> Option<CanopyClientBuilder> {
    dotenvy::dotenv().ok();
    if env::var("CANOPY_QUERY_URL").is_err() {
        println!("CANOPY_QUERY_URL not set, skipping");
        return None;
    }
    Some(CanopyClientBuilder::from_env().expect("invalid CANOPY_* environment"))
}

fn funded_key() -> Option<(CurveType, String)> {
    let key = env::var("CANOPY_TEST_PRIVATE_KEY").ok()?;
    let curve = env::var("CANOPY_TEST_CURVE")
        .unwrap_or_else(|_| "ED25519".to_string())
        .parse()
        .expect("CANOPY_TEST_CURVE is not a known curve");
    Some((curve, key))
}

fn fee() -> u64 {
    env::var("CANOPY_TEST_FEE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10_000)
}

// ============================================================================
// Query API
// ============================================================================

#[tokio::test]
#[ignore]
async fn test_height_is_positive() {
    let Some(builder) = client_from_env() else {
        return;
    };
    let client = builder.build().unwrap();
    let height = client.transactions().height().await.unwrap();
    println!("height: {}", height);
    assert!(height > 0);
}

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
#[ignore]
async fn test_self_send_is_accepted() {
    let Some(builder) = client_from_env() else {
        return;
    };
    let Some((curve, private_key)) = funded_key() else {
        println!("CANOPY_TEST_PRIVATE_KEY not set, skipping");
        return;
    };
    let mut keystore = InMemoryKeystore::new();
    let address = keystore.import_hex(curve, &private_key).unwrap();
    let client = builder.key_provider(keystore).build().unwrap();

    let submitted = client
        .transactions()
        .send(
            MessageSend {
                from_address: address,
                to_address: address,
                amount: 1,
            },
            fee(),
            "sdk integration",
            &address,
        )
        .await
        .unwrap();

    println!("tx hash: {}", submitted.hash);
    assert!(!submitted.hash.is_empty());
    submitted.transaction.verify().unwrap();
}

#[tokio::test]
#[ignore]
async fn test_bad_signature_is_rejected() {
    let Some(builder) = client_from_env() else {
        return;
    };
    let Some((curve, private_key)) = funded_key() else {
        println!("CANOPY_TEST_PRIVATE_KEY not set, skipping");
        return;
    };
    let key = KeyEntry::from_private_key(
        curve,
        &hex::decode(private_key.trim_start_matches("0x")).unwrap(),
    )
    .unwrap();
    let client = builder.build().unwrap();
    let height = client.transactions().height().await.unwrap();

    let mut signed = TransactionBuilder::new()
        .message(MessageSend {
            from_address: key.address(),
            to_address: key.address(),
            amount: 1,
        })
        .fee(fee())
        .network_id(client.network_id())
        .chain_id(client.chain_id())
        .created_height(height)
        .build_and_sign(&key)
        .unwrap();
    signed.signature.signature[0] ^= 0xff;

    let result = client.transactions().submit(&signed).await;
    println!("rejection: {:?}", result);
    assert!(matches!(result, Err(SdkError::Http(_))));
}
