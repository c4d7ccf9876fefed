//! Startup from `ETH_*` environment variables.
//!
//! Kept in its own test binary: it mutates the process environment.

use serde_json::json;

use chain_signer::{KeyStatus, SignedChainClient};

mod common;
use common::{start_mock_rpc, TEST_PRIVATE_KEY};

#[tokio::test]
async fn test_from_env_loads_endpoint_and_key() {
    let mock = start_mock_rpc(|method, _| match method {
        "eth_chainId" => Ok(json!("0x539")),
        other => Err(format!("unexpected {}", other)),
    })
    .await;

    std::env::set_var("ETH_RPC", mock.url());
    std::env::set_var("ETH_CHAIN_ID", "1337");
    std::env::set_var("ETH_PRIVATE_KEY", format!("0x{}", TEST_PRIVATE_KEY));

    let client = SignedChainClient::from_env().await.unwrap();
    assert_eq!(client.config().endpoint, mock.url());
    assert_eq!(client.config().chain_id, 1337);
    assert_eq!(client.key_status(), &KeyStatus::Loaded);
    assert_eq!(
        client.resolve_own_address().unwrap().to_string().to_lowercase(),
        "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
    );

    // A blank key means read-only mode, not a parse failure.
    std::env::set_var("ETH_PRIVATE_KEY", "  ");
    let client = SignedChainClient::from_env().await.unwrap();
    assert_eq!(client.key_status(), &KeyStatus::Missing);
    assert_eq!(mock.methods(), vec!["eth_chainId", "eth_chainId"]);
}
