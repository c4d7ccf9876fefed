//! Signed JSON-RPC client.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint and probe it at startup
//! - Hold the optional signing key (read-only mode without one)
//! - Pass storage reads, calls and raw transactions through to the provider
//!
//! # Concurrency
//! The client holds no mutable state and can be shared freely. Nonces are
//! fetched from the chain on every [`SignedChainClient::submit_transaction`];
//! two concurrent submissions from the same sender can observe the same nonce
//! and one of them will be rejected by the network. Callers that submit
//! concurrently must sequence submissions themselves.

use alloy::eips::BlockId;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::TransportResult;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::transaction::{build_legacy_tx, encode_signed, LegacyTxParams};
use crate::blockchain::types::{
    ChainError, ChainResult, KeyStatus, MessageSignature, StartupError,
};
use crate::blockchain::wallet::{private_key_from_env, Wallet};
use crate::config::{validate_config, ClientConfig, ConfigError, ValidationError};
use crate::observability::metrics;

type SharedProvider = Arc<dyn Provider + Send + Sync>;

/// Client that reads chain state and signs on behalf of one key.
#[derive(Clone)]
pub struct SignedChainClient {
    /// Network handle; `None` for a client that was never connected.
    provider: Option<SharedProvider>,
    wallet: Option<Wallet>,
    key_status: KeyStatus,
    config: ClientConfig,
}

impl SignedChainClient {
    /// Connect to `config.endpoint` and load the optional key.
    ///
    /// Fails if the configuration is invalid or the endpoint is unreachable.
    /// A chain id other than `config.chain_id` is fatal only when a key is
    /// loaded; a read-only client logs the mismatch and continues. A missing or
    /// malformed key only switches the client to read-only mode; see
    /// [`Self::key_status`].
    pub async fn connect(
        config: ClientConfig,
        private_key: Option<&str>,
    ) -> Result<Self, StartupError> {
        validate_config(&config)
            .map_err(|errors| StartupError::Config(ConfigError::Validation(errors)))?;

        let url: url::Url = config.endpoint.parse().map_err(|e: url::ParseError| {
            StartupError::Config(ConfigError::Validation(vec![ValidationError::new(
                "endpoint",
                e.to_string(),
            )]))
        })?;
        let provider: SharedProvider = Arc::new(ProviderBuilder::new().connect_http(url));

        let (wallet, key_status) = load_wallet(private_key, config.chain_id);
        let client = Self {
            provider: Some(provider),
            wallet,
            key_status,
            config,
        };

        let actual = client
            .chain_id()
            .await
            .map_err(|source| StartupError::Endpoint {
                url: client.config.endpoint.clone(),
                source,
            })?;
        if actual != client.config.chain_id {
            if client.key_status.is_loaded() {
                return Err(StartupError::ChainMismatch {
                    expected: client.config.chain_id,
                    actual,
                });
            }
            tracing::warn!(
                expected = client.config.chain_id,
                actual = actual,
                "Chain ID mismatch ignored in read-only mode"
            );
        }

        tracing::info!(
            endpoint = %client.config.endpoint,
            chain_id = actual,
            read_only = !client.key_status.is_loaded(),
            "Chain client initialized"
        );

        Ok(client)
    }

    /// Connect using `ETH_*` environment configuration and `ETH_PRIVATE_KEY`.
    pub async fn from_env() -> Result<Self, StartupError> {
        let config = ClientConfig::from_env()?;
        let key = private_key_from_env();
        Self::connect(config, key.as_deref()).await
    }

    /// Build a client around an existing provider without probing it.
    pub fn with_provider<P>(provider: P, config: ClientConfig, wallet: Option<Wallet>) -> Self
    where
        P: Provider + 'static,
    {
        let key_status = if wallet.is_some() {
            KeyStatus::Loaded
        } else {
            KeyStatus::Missing
        };
        Self {
            provider: Some(Arc::new(provider)),
            wallet,
            key_status,
            config,
        }
    }

    /// A client without a network handle. Every operation fails with
    /// [`ChainError::ClientUninitialized`].
    pub fn uninitialized(config: ClientConfig, wallet: Option<Wallet>) -> Self {
        let key_status = if wallet.is_some() {
            KeyStatus::Loaded
        } else {
            KeyStatus::Missing
        };
        Self {
            provider: None,
            wallet,
            key_status,
            config,
        }
    }

    /// Address of the configured key.
    pub fn resolve_own_address(&self) -> ChainResult<Address> {
        self.provider()?;
        Ok(self.wallet()?.address())
    }

    /// Read a storage slot of `contract` at the latest block.
    pub async fn read_storage_at(&self, contract: Address, slot: B256) -> ChainResult<B256> {
        let provider = self.provider()?;
        tracing::debug!(contract = %contract, slot = %slot, "Reading storage");

        let value = self
            .rpc(
                "eth_getStorageAt",
                provider
                    .get_storage_at(contract, U256::from_be_bytes(slot.0))
                    .block_id(BlockId::latest()),
            )
            .await?;
        Ok(B256::from(value.to_be_bytes::<32>()))
    }

    /// Keccak-256 `message` and sign the digest with the configured key.
    pub async fn sign_message(&self, message: &[u8]) -> ChainResult<MessageSignature> {
        self.provider()?;
        let wallet = self.wallet()?;
        let signature = wallet.sign_message_digest(message).await?;
        Ok(MessageSignature::from_signature(&signature))
    }

    /// Execute a non-mutating call from the own address at the latest block.
    pub async fn call_contract_read_only(&self, to: Address, data: Bytes) -> ChainResult<Bytes> {
        let provider = self.provider()?;
        let sender = self.resolve_own_address()?;
        tracing::debug!(from = %sender, to = %to, data_len = data.len(), "Calling contract");

        let request = TransactionRequest::default()
            .with_from(sender)
            .with_to(to)
            .with_input(data);
        self.rpc("eth_call", provider.call(request).block(BlockId::latest()))
            .await
    }

    /// Sign and broadcast a zero-value transaction to `to` carrying `data`.
    ///
    /// Returns the hash of the signed transaction.
    pub async fn submit_transaction(&self, to: Address, data: Bytes) -> ChainResult<TxHash> {
        let provider = self.provider()?;
        let sender = self.resolve_own_address()?;
        let wallet = self.wallet()?;

        let nonce = self
            .rpc(
                "eth_getTransactionCount",
                provider
                    .get_transaction_count(sender)
                    .block_id(BlockId::latest()),
            )
            .await?;

        let tx = build_legacy_tx(LegacyTxParams::from(&self.config), nonce, to, data);
        let signed = wallet.sign_legacy(tx)?;
        let tx_hash = *signed.hash();
        let raw = encode_signed(&signed);

        let pending = self
            .rpc("eth_sendRawTransaction", provider.send_raw_transaction(&raw))
            .await?;
        if *pending.tx_hash() != tx_hash {
            tracing::warn!(
                local = %tx_hash,
                remote = %pending.tx_hash(),
                "Node reported a different transaction hash"
            );
        }

        tracing::info!(
            tx_hash = %tx_hash,
            from = %sender,
            to = %to,
            nonce = nonce,
            "Transaction submitted"
        );
        Ok(tx_hash)
    }

    /// Chain id reported by the endpoint.
    pub async fn chain_id(&self) -> ChainResult<u64> {
        let provider = self.provider()?;
        self.rpc("eth_chainId", provider.get_chain_id()).await
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn key_status(&self) -> &KeyStatus {
        &self.key_status
    }

    pub fn is_initialized(&self) -> bool {
        self.provider.is_some()
    }

    fn provider(&self) -> ChainResult<&(dyn Provider + Send + Sync)> {
        self.provider
            .as_deref()
            .ok_or(ChainError::ClientUninitialized)
    }

    fn wallet(&self) -> ChainResult<&Wallet> {
        self.wallet.as_ref().ok_or(ChainError::NoKeyConfigured)
    }

    /// Await one RPC under the configured timeout and record its outcome.
    async fn rpc<F, T>(&self, method: &'static str, call: F) -> ChainResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        let result = match self.config.rpc_timeout_secs {
            0 => call.await.map_err(|e| ChainError::Network(e.to_string())),
            secs => match timeout(Duration::from_secs(secs), call).await {
                Ok(result) => result.map_err(|e| ChainError::Network(e.to_string())),
                Err(_) => Err(ChainError::Timeout(secs)),
            },
        };

        metrics::record_rpc(method, result.is_ok());
        if let Err(e) = &result {
            tracing::warn!(method = method, error = %e, "RPC failed");
        }
        result
    }
}

/// Parse the optional key, degrading to read-only mode on any problem.
fn load_wallet(private_key: Option<&str>, chain_id: u64) -> (Option<Wallet>, KeyStatus) {
    match private_key {
        None => {
            tracing::warn!("No private key configured, running in read-only mode");
            (None, KeyStatus::Missing)
        }
        Some(key) => match Wallet::from_private_key(key, chain_id) {
            Ok(wallet) => (Some(wallet), KeyStatus::Loaded),
            Err(e) => {
                tracing::warn!(error = %e, "Private key rejected, running in read-only mode");
                (None, KeyStatus::Invalid(e.to_string()))
            }
        },
    }
}

impl std::fmt::Debug for SignedChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedChainClient")
            .field("endpoint", &self.config.endpoint)
            .field("chain_id", &self.config.chain_id)
            .field("initialized", &self.provider.is_some())
            .field("wallet", &self.wallet)
            .finish()
    }
}
