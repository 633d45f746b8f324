use super::signer;
use crate::domain::canonical::SIGN_FIELD;
use crate::domain::envelope::Envelope;
use crate::domain::sign_type::SignType;
use crate::error::{GatewayError, Result};
use crate::interfaces::xml::codec;
use rsa::RsaPublicKey;
use tracing::warn;

/// Authenticates asynchronous payment notifications.
pub struct NotificationVerifier {
    public_key: Option<RsaPublicKey>,
}

impl NotificationVerifier {
    pub fn new(public_key: Option<RsaPublicKey>) -> Self {
        Self { public_key }
    }

    /// Parses `xml` and returns its fields once the signature checks out.
    ///
    /// The algorithm comes from the notification's own `sign_type`, which
    /// must name a supported scheme before any verification is attempted.
    pub fn verify(&self, xml: &str) -> Result<Envelope> {
        let envelope = codec::decode(xml)?;

        let sign_type_id = envelope.get("sign_type").unwrap_or_default();
        let Ok(sign_type) = sign_type_id.parse::<SignType>() else {
            warn!(sign_type = sign_type_id, "notification with unsupported sign type");
            return Err(GatewayError::UnsupportedSignType(sign_type_id.to_owned()));
        };

        let key = self
            .public_key
            .as_ref()
            .ok_or_else(|| GatewayError::Config("public key is not configured".to_owned()))?;
        let signature = envelope.get(SIGN_FIELD).ok_or(GatewayError::InvalidSignature)?;

        if signer::verify(envelope.fields(), sign_type, signature, key) {
            Ok(envelope)
        } else {
            warn!(
                out_trade_no = envelope.get("out_trade_no").unwrap_or_default(),
                "notification signature mismatch"
            );
            Err(GatewayError::InvalidSignature)
        }
    }
}
