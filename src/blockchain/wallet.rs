//! Private key handling and signing.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables or explicit arguments
//! - Keys are never logged or serialized

use alloy::consensus::{SignableTransaction, Signed, TxLegacy};
use alloy::network::TxSignerSync;
use alloy::primitives::{keccak256, Address, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, Signer};

use crate::blockchain::types::{ChainError, ChainResult};
use crate::observability::metrics;

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "ETH_PRIVATE_KEY";

/// Read `ETH_PRIVATE_KEY`, treating an unset or blank value as no key.
pub fn private_key_from_env() -> Option<String> {
    std::env::var(PRIVATE_KEY_ENV_VAR)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// Holds the signing key and the chain it signs for.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    /// Chain ID for EIP-155 replay protection.
    chain_id: u64,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    /// * `chain_id` - Chain ID for transaction signing
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> ChainResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| ChainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(
            address = %signer.address(),
            chain_id = chain_id,
            "Wallet initialized"
        );

        Ok(Self {
            signer: signer.with_chain_id(Some(chain_id)),
            chain_id,
        })
    }

    /// Address derived from the public half of the key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Sign a 32-byte digest as-is.
    pub async fn sign_hash(&self, hash: B256) -> ChainResult<Signature> {
        self.signer
            .sign_hash(&hash)
            .await
            .map_err(|e| ChainError::Signing(e.to_string()))
    }

    /// Keccak-256 the message and sign the digest. No EIP-191 prefix is applied.
    pub async fn sign_message_digest(&self, message: &[u8]) -> ChainResult<Signature> {
        let signature = self.sign_hash(keccak256(message)).await?;
        metrics::record_signature("message");
        Ok(signature)
    }

    /// Sign a legacy transaction with EIP-155 replay protection.
    pub fn sign_legacy(&self, mut tx: TxLegacy) -> ChainResult<Signed<TxLegacy>> {
        let signature = self
            .signer
            .sign_transaction_sync(&mut tx)
            .map_err(|e| ChainError::Signing(e.to_string()))?;
        metrics::record_signature("transaction");
        Ok(tx.into_signed(signature))
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id)
            .finish()
    }
}
