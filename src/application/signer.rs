//! RSA signing and verification of canonical parameter strings.

use crate::domain::canonical::canonicalize;
use crate::domain::sign_type::SignType;
use crate::error::{GatewayError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::Sha256;

/// Signs the canonical form of `fields` and returns the base64 signature.
///
/// Any `sign` entry in `fields` is ignored.
pub fn sign<K, V>(
    fields: impl IntoIterator<Item = (K, V)>,
    sign_type: SignType,
    key: &RsaPrivateKey,
) -> Result<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let message = canonicalize(fields);
    let signature = match sign_type {
        SignType::Rsa256 => SigningKey::<Sha256>::new(key.clone())
            .try_sign(message.as_bytes())
            .map(|s| s.to_vec()),
        SignType::Rsa1 => SigningKey::<Sha1>::new(key.clone())
            .try_sign(message.as_bytes())
            .map(|s| s.to_vec()),
    }
    .map_err(|e| GatewayError::Key(format!("signing failed: {e}")))?;

    Ok(STANDARD.encode(signature))
}

/// Checks a base64 `signature` against the canonical form of `fields`.
///
/// A signature that is not valid base64 simply fails verification.
pub fn verify<K, V>(
    fields: impl IntoIterator<Item = (K, V)>,
    sign_type: SignType,
    signature: &str,
    key: &RsaPublicKey,
) -> bool
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let Ok(raw) = STANDARD.decode(signature.trim()) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(raw.as_slice()) else {
        return false;
    };
    let message = canonicalize(fields);

    match sign_type {
        SignType::Rsa256 => VerifyingKey::<Sha256>::new(key.clone())
            .verify(message.as_bytes(), &signature)
            .is_ok(),
        SignType::Rsa1 => VerifyingKey::<Sha1>::new(key.clone())
            .verify(message.as_bytes(), &signature)
            .is_ok(),
    }
}

/// Reads an RSA private key from PKCS#8 or PKCS#1 PEM.
///
/// Bare base64 key bodies, as handed out by the merchant portal, are
/// accepted too.
pub fn parse_private_key(material: &str) -> Result<RsaPrivateKey> {
    let material = material.trim();
    if material.starts_with("-----BEGIN") {
        return RsaPrivateKey::from_pkcs8_pem(material)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(material))
            .map_err(|e| GatewayError::Key(format!("invalid private key: {e}")));
    }

    RsaPrivateKey::from_pkcs8_pem(&armor(material, "PRIVATE KEY"))
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(&armor(material, "RSA PRIVATE KEY")))
        .map_err(|e| GatewayError::Key(format!("invalid private key: {e}")))
}

/// Reads an RSA public key from SubjectPublicKeyInfo or PKCS#1 PEM, or a bare
/// base64 body.
pub fn parse_public_key(material: &str) -> Result<RsaPublicKey> {
    let material = material.trim();
    if material.starts_with("-----BEGIN") {
        return RsaPublicKey::from_public_key_pem(material)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(material))
            .map_err(|e| GatewayError::Key(format!("invalid public key: {e}")));
    }

    RsaPublicKey::from_public_key_pem(&armor(material, "PUBLIC KEY"))
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(&armor(material, "RSA PUBLIC KEY")))
        .map_err(|e| GatewayError::Key(format!("invalid public key: {e}")))
}

fn armor(body: &str, label: &str) -> String {
    let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    let mut pem = format!("-----BEGIN {label}-----\n");
    for line in compact.as_bytes().chunks(64) {
        // base64 is ASCII, so chunk boundaries are char boundaries
        pem.push_str(&String::from_utf8_lossy(line));
        pem.push('\n');
    }
    pem.push_str(&format!("-----END {label}-----\n"));
    pem
}
