//! Chain-specific types and error definitions.

use alloy::primitives::B256;
use alloy::signers::Signature;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// Offset added to the recovery id to obtain the legacy Ethereum `v` value.
pub const LEGACY_V_OFFSET: u8 = 27;

/// Signature over a message digest in the (V, R, S) layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSignature {
    /// Recovery id plus 27.
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl MessageSignature {
    /// Repackage a raw secp256k1 signature into the (V, R, S) form.
    pub fn from_signature(signature: &Signature) -> Self {
        Self {
            v: signature.v() as u8 + LEGACY_V_OFFSET,
            r: B256::from(signature.r().to_be_bytes::<32>()),
            s: B256::from(signature.s().to_be_bytes::<32>()),
        }
    }

    /// The recovery id (0 or 1) carried in `v`, or `None` if `v` is not 27 or 28.
    pub fn recovery_id(&self) -> Option<u8> {
        self.v.checked_sub(LEGACY_V_OFFSET).filter(|id| *id <= 1)
    }

    /// 65-byte `r ‖ s ‖ v` encoding.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(self.r.as_slice());
        out[32..64].copy_from_slice(self.s.as_slice());
        out[64] = self.v;
        out
    }
}

/// Outcome of loading the private key at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyStatus {
    /// A key was loaded; signing is available.
    Loaded,
    /// No key was supplied; read-only mode.
    Missing,
    /// A key was supplied but could not be parsed; read-only mode.
    Invalid(String),
}

impl KeyStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, KeyStatus::Loaded)
    }
}

/// Errors returned by client operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// No network handle is present.
    #[error("client is not initialized")]
    ClientUninitialized,

    /// A signing or address operation was requested without a key.
    #[error("no private key configured")]
    NoKeyConfigured,

    /// Transport or RPC failure, including reverted calls.
    #[error("RPC error: {0}")]
    Network(String),

    /// RPC request exceeded the configured timeout.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The signer rejected the digest or transaction.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Invalid private key format or derivation error.
    #[error("wallet error: {0}")]
    Wallet(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Fatal errors raised while constructing a client.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("endpoint {url} is unreachable: {source}")]
    Endpoint {
        url: String,
        #[source]
        source: ChainError,
    },

    #[error("chain ID mismatch: configured {expected}, endpoint reports {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
