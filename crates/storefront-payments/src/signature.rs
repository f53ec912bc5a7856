// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook signatures: hex-encoded HMAC-SHA512 of the raw request body,
//! keyed with the gateway secret.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use storefront_core::StorefrontError;

type HmacSha512 = Hmac<Sha512>;

/// Hex length of a SHA-512 MAC.
const SIGNATURE_HEX_LEN: usize = 128;

fn mac(secret: &[u8], body: &[u8]) -> Result<HmacSha512, StorefrontError> {
    let mut mac = HmacSha512::new_from_slice(secret)
        .map_err(|e| StorefrontError::Internal(format!("HMAC key rejected: {e}")))?;
    mac.update(body);
    Ok(mac)
}

/// Lowercase hex signature of `body`.
pub fn sign(secret: &[u8], body: &[u8]) -> Result<String, StorefrontError> {
    Ok(hex::encode(mac(secret, body)?.finalize().into_bytes()))
}

/// Check `signature` against the body. The comparison is constant time.
pub fn verify(secret: &[u8], body: &[u8], signature: &str) -> Result<(), StorefrontError> {
    let signature = signature.trim();
    if signature.len() != SIGNATURE_HEX_LEN {
        return Err(StorefrontError::InvalidSignature);
    }
    let expected = hex::decode(signature).map_err(|_| StorefrontError::InvalidSignature)?;
    mac(secret, body)?
        .verify_slice(&expected)
        .map_err(|_| StorefrontError::InvalidSignature)
}
