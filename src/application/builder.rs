use super::signer;
use crate::domain::canonical::SIGN_FIELD;
use crate::domain::defaults::{AccountDefaults, merge_defaults};
use crate::domain::operation::{Operation, service};
use crate::domain::params::Params;
use crate::domain::requirement::check_required;
use crate::domain::sign_type::SignType;
use crate::error::{GatewayError, Result};
use crate::interfaces::xml::codec;
use rand::Rng;
use rand::distributions::Alphanumeric;
use rsa::RsaPrivateKey;
use tracing::debug;

pub const NONCE_LEN: usize = 32;

/// Random `[A-Za-z0-9]` string used as `nonce_str`.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// A fully prepared call: defaults merged, validated and signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub operation: Operation,
    pub params: Params,
}

impl SignedRequest {
    pub fn service(&self) -> &str {
        self.params.get("service").unwrap_or_default()
    }

    pub fn to_xml(&self) -> Result<String> {
        codec::encode(self.params.iter())
    }
}

/// Turns caller parameters into signed gateway requests.
pub struct RequestBuilder {
    defaults: AccountDefaults,
    private_key: Option<RsaPrivateKey>,
}

impl RequestBuilder {
    pub fn new(defaults: AccountDefaults, private_key: Option<RsaPrivateKey>) -> Self {
        Self {
            defaults,
            private_key,
        }
    }

    pub fn defaults(&self) -> &AccountDefaults {
        &self.defaults
    }

    pub fn build(&self, operation: Operation, mut params: Params) -> Result<SignedRequest> {
        match operation.fixed_service() {
            Some(name) => params.insert("service", name),
            None => params.insert_if_blank("service", || service::JS_PAY.to_owned()),
        }
        if operation == Operation::CreateOrder {
            params.insert_if_blank("is_raw", || "1".to_owned());
        }

        let mut params = merge_defaults(params, &self.defaults, operation.default_fields());
        params.insert_if_blank("nonce_str", generate_nonce);

        if let Some(url) = params.get("long_url").filter(|u| !u.is_empty()) {
            let encoded = urlencoding::encode(url).into_owned();
            params.insert("long_url", encoded);
        }

        check_required(&params, operation.required())?;

        let sign_type = match params.get("sign_type").filter(|s| !s.is_empty()) {
            Some(id) => id.parse::<SignType>()?,
            None => self.defaults.sign_type,
        };
        let key = self
            .private_key
            .as_ref()
            .ok_or_else(|| GatewayError::Config("private key is not configured".to_owned()))?;

        params.remove(SIGN_FIELD);
        let signature = signer::sign(params.iter(), sign_type, key)?;
        params.insert(SIGN_FIELD, signature);

        debug!(
            %operation,
            service = params.get("service").unwrap_or_default(),
            nonce = params.get("nonce_str").unwrap_or_default(),
            "built signed request"
        );

        Ok(SignedRequest { operation, params })
    }
}
