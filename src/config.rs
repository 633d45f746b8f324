//! Client configuration and the credentials derived from it.
//!
//! Settings come from an optional TOML file overlaid with `SWIFTPASS_*`
//! environment variables, e.g. `SWIFTPASS_MCH_ID`.

use crate::application::signer::{parse_private_key, parse_public_key};
use crate::domain::defaults::AccountDefaults;
use crate::domain::sign_type::SignType;
use crate::error::{GatewayError, Result};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Production gateway endpoint.
pub const GATEWAY_URL: &str = "https://pay.swiftpass.cn/pay/gateway";

/// Recognized construction options.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub mch_id: String,
    pub sub_appid: Option<String>,
    /// Shared secret; kept for compatibility, RSA signing does not use it.
    pub partner_key: Option<String>,
    pub notify_url: Option<String>,
    /// Passphrase for the client certificate; defaults to `mch_id`.
    pub passphrase: Option<String>,
    /// Client certificate bundle (PKCS#12).
    pub pfx: Option<PathBuf>,
    /// PEM or bare base64 private key.
    pub private_key: Option<String>,
    pub private_key_path: Option<PathBuf>,
    /// PEM or bare base64 gateway public key.
    pub public_key: Option<String>,
    pub public_key_path: Option<PathBuf>,
    pub sign_type: Option<SignType>,
    pub endpoint: Option<String>,
}

impl ClientConfig {
    /// Loads settings from `path` (if given) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }
        let settings = builder
            .add_source(::config::Environment::with_prefix("SWIFTPASS"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(GATEWAY_URL)
    }

    pub fn passphrase(&self) -> &str {
        self.passphrase.as_deref().unwrap_or(&self.mch_id)
    }

    pub fn sign_type(&self) -> SignType {
        self.sign_type.unwrap_or_default()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("mch_id", &self.mch_id)
            .field("sub_appid", &self.sub_appid)
            .field("notify_url", &self.notify_url)
            .field("sign_type", &self.sign_type)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Immutable material a client works with, parsed once.
pub struct Credentials {
    pub defaults: AccountDefaults,
    pub private_key: Option<RsaPrivateKey>,
    pub public_key: Option<RsaPublicKey>,
    pub partner_key: Option<String>,
    pub passphrase: String,
    pub pfx: Option<PathBuf>,
}

impl Credentials {
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        if config.mch_id.is_empty() {
            return Err(GatewayError::Config("mch_id is required".to_owned()));
        }

        let private_key = read_key(&config.private_key, &config.private_key_path)?
            .map(|pem| parse_private_key(&pem))
            .transpose()?;
        let public_key = read_key(&config.public_key, &config.public_key_path)?
            .map(|pem| parse_public_key(&pem))
            .transpose()?;

        Ok(Self {
            defaults: AccountDefaults {
                sub_appid: config.sub_appid.clone(),
                sign_type: config.sign_type(),
                notify_url: config.notify_url.clone(),
                ..AccountDefaults::for_merchant(config.mch_id.clone())
            },
            private_key,
            public_key,
            partner_key: config.partner_key.clone(),
            passphrase: config.passphrase().to_owned(),
            pfx: config.pfx.clone(),
        })
    }
}

fn read_key(inline: &Option<String>, path: &Option<PathBuf>) -> Result<Option<String>> {
    match (inline, path) {
        (Some(pem), _) if !pem.trim().is_empty() => Ok(Some(pem.clone())),
        (_, Some(path)) => std::fs::read_to_string(path).map(Some).map_err(|e| {
            GatewayError::Config(format!("cannot read key file {}: {e}", path.display()))
        }),
        _ => Ok(None),
    }
}
