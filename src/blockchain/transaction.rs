//! Legacy transaction assembly and encoding.
//!
//! Transactions are plain value-less calls: the destination, the payload and a
//! fresh nonce come from the caller, everything else from [`LegacyTxParams`].

use alloy::consensus::{Signed, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, Bytes, TxKind, U256};

use crate::config::ClientConfig;

/// Fee and replay-protection parameters shared by every submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyTxParams {
    pub chain_id: u64,
    pub gas_limit: u64,
    pub gas_price: u128,
}

impl From<&ClientConfig> for LegacyTxParams {
    fn from(config: &ClientConfig) -> Self {
        Self {
            chain_id: config.chain_id,
            gas_limit: config.gas_limit,
            gas_price: config.gas_price_wei,
        }
    }
}

/// Build an unsigned EIP-155 legacy transaction with zero value.
pub fn build_legacy_tx(params: LegacyTxParams, nonce: u64, to: Address, data: Bytes) -> TxLegacy {
    TxLegacy {
        chain_id: Some(params.chain_id),
        nonce,
        gas_price: params.gas_price,
        gas_limit: params.gas_limit,
        to: TxKind::Call(to),
        value: U256::ZERO,
        input: data,
    }
}

/// Raw bytes for `eth_sendRawTransaction`.
pub fn encode_signed(signed: &Signed<TxLegacy>) -> Bytes {
    let envelope = TxEnvelope::Legacy(signed.clone());
    Bytes::from(envelope.encoded_2718())
}
