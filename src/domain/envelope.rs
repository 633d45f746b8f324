use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const RETURN_FAIL: &str = "FAIL";

/// A parsed gateway response or notification body.
///
/// Holds the children of the `<xml>` root as plain strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(BTreeMap<String, String>);

impl Envelope {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn return_code(&self) -> Option<&str> {
        self.get("return_code")
    }

    pub fn return_msg(&self) -> Option<&str> {
        self.get("return_msg")
    }

    pub fn result_code(&self) -> Option<&str> {
        self.get("result_code")
    }

    pub fn err_code(&self) -> Option<&str> {
        self.get("err_code")
    }

    pub fn err_msg(&self) -> Option<&str> {
        self.get("err_msg")
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Envelope {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
