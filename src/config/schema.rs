//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Client configuration.
///
/// Defaults match the Kovan test network the client was first deployed against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// JSON-RPC endpoint URL.
    pub endpoint: String,

    /// Chain ID used for EIP-155 signing and checked against the endpoint.
    pub chain_id: u64,

    /// Gas limit attached to every submitted transaction.
    pub gas_limit: u64,

    /// Gas price in wei attached to every submitted transaction.
    pub gas_price_wei: u128,

    /// Per-request timeout in seconds. 0 leaves requests to the transport default.
    pub rpc_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8545".to_string(),
            chain_id: 42,
            gas_limit: 1_000_000,
            gas_price_wei: 10_000_000_000,
            rpc_timeout_secs: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str(r#"endpoint = "http://node:8545""#).unwrap();
        assert_eq!(config.endpoint, "http://node:8545");
        assert_eq!(config.chain_id, 42);
        assert_eq!(config.gas_limit, 1_000_000);
        assert_eq!(config.rpc_timeout_secs, 0);
    }

    #[test]
    fn test_full_toml() {
        let config: ClientConfig = toml::from_str(
            r#"
            endpoint = "https://rpc.example.org"
            chain_id = 1
            gas_limit = 250000
            gas_price_wei = 30000000000
            rpc_timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.chain_id, 1);
        assert_eq!(config.gas_limit, 250_000);
        assert_eq!(config.gas_price_wei, 30_000_000_000);
        assert_eq!(config.rpc_timeout_secs, 3);
    }
}
