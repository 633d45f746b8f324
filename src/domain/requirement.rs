use super::params::Params;
use crate::error::{GatewayError, Result};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A required-field rule: satisfied when any one of its alternatives holds
/// a non-empty value.
///
/// Parsed once from the `a|b|c` notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    alternatives: Vec<String>,
}

impl Requirement {
    pub fn any_of<I, S>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            alternatives: alternatives.into_iter().map(Into::into).collect(),
        }
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn is_satisfied_by(&self, params: &Params) -> bool {
        self.alternatives
            .iter()
            .rev()
            .any(|key| params.is_present(key))
    }
}

impl FromStr for Requirement {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::any_of(s.split('|')))
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.alternatives.join("|"))
    }
}

/// Parses a list of `a|b` rules.
pub fn parse_requirements(specs: &[&str]) -> Vec<Requirement> {
    specs
        .iter()
        .map(|spec| Requirement::any_of(spec.split('|')))
        .collect()
}

/// Checks every rule and reports all unsatisfied ones at once.
pub fn check_required(params: &Params, required: &[Requirement]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|rule| !rule.is_satisfied_by(params))
        .map(ToString::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(GatewayError::MissingParams(missing))
    }
}
