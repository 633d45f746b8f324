use super::operation::DefaultField;
use super::params::Params;
use super::sign_type::SignType;

/// Account-level values that fill gaps in a caller's parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDefaults {
    pub mch_id: String,
    pub sub_appid: Option<String>,
    pub sign_type: SignType,
    pub notify_url: Option<String>,
    pub op_user_id: Option<String>,
}

impl AccountDefaults {
    /// Defaults for a merchant; the refund operator defaults to the merchant.
    pub fn for_merchant(mch_id: impl Into<String>) -> Self {
        let mch_id = mch_id.into();
        Self {
            op_user_id: Some(mch_id.clone()),
            mch_id,
            sub_appid: None,
            sign_type: SignType::default(),
            notify_url: None,
        }
    }

    fn value(&self, field: DefaultField) -> Option<&str> {
        match field {
            DefaultField::MchId => Some(self.mch_id.as_str()),
            DefaultField::SubAppId => self.sub_appid.as_deref(),
            DefaultField::SignType => Some(self.sign_type.as_str()),
            DefaultField::NotifyUrl => self.notify_url.as_deref(),
            DefaultField::OpUserId => self.op_user_id.as_deref(),
        }
    }
}

/// Lays `params` over the defaults named by `fields`.
///
/// A default is applied only when it is non-empty and the caller did not
/// supply the key; caller values always win, even empty ones.
pub fn merge_defaults(params: Params, defaults: &AccountDefaults, fields: &[DefaultField]) -> Params {
    let mut merged = Params::new();
    for field in fields {
        if let Some(value) = defaults.value(*field).filter(|v| !v.is_empty()) {
            merged.insert(field.key(), value);
        }
    }
    for (key, value) in params.into_inner() {
        merged.insert(key, value);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> AccountDefaults {
        AccountDefaults {
            sub_appid: Some("wx-sub".to_owned()),
            notify_url: Some("https://shop.example/notify".to_owned()),
            ..AccountDefaults::for_merchant("7551000001")
        }
    }

    #[test]
    fn test_whitelisted_defaults_are_applied() {
        let merged = merge_defaults(
            Params::new().with("out_trade_no", "T1"),
            &defaults(),
            &[DefaultField::MchId, DefaultField::SignType],
        );

        assert_eq!(merged.get("mch_id"), Some("7551000001"));
        assert_eq!(merged.get("sign_type"), Some("RSA_1_256"));
        assert_eq!(merged.get("out_trade_no"), Some("T1"));
        assert_eq!(merged.get("notify_url"), None);
        assert_eq!(merged.get("sub_appid"), None);
    }

    #[test]
    fn test_caller_values_win() {
        let merged = merge_defaults(
            Params::new().with("mch_id", "other").with("notify_url", ""),
            &defaults(),
            &[DefaultField::MchId, DefaultField::NotifyUrl],
        );

        assert_eq!(merged.get("mch_id"), Some("other"));
        assert_eq!(merged.get("notify_url"), Some(""));
    }

    #[test]
    fn test_absent_defaults_are_skipped() {
        let merged = merge_defaults(
            Params::new(),
            &AccountDefaults::for_merchant("m"),
            &[DefaultField::SubAppId, DefaultField::NotifyUrl, DefaultField::OpUserId],
        );

        assert_eq!(merged.get("sub_appid"), None);
        assert_eq!(merged.get("notify_url"), None);
        assert_eq!(merged.get("op_user_id"), Some("m"));
    }
}
