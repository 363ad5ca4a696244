//! Competencies, behavioral indicators and standard taxonomy mappings.

use crate::errors::ValidationError;
use crate::identifiers::{CompetencyId, IndicatorId};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

// O*NET-SOC taxonomy code, e.g. 15-1252.00
static ONET_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}-\d{4}\.\d{2}$").expect("static O*NET pattern"));

/// Five-factor personality traits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BigFiveTrait {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl BigFiveTrait {
    pub const ALL: [BigFiveTrait; 5] = [
        BigFiveTrait::Openness,
        BigFiveTrait::Conscientiousness,
        BigFiveTrait::Extraversion,
        BigFiveTrait::Agreeableness,
        BigFiveTrait::Neuroticism,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Openness => "OPENNESS",
            Self::Conscientiousness => "CONSCIENTIOUSNESS",
            Self::Extraversion => "EXTRAVERSION",
            Self::Agreeableness => "AGREEABLENESS",
            Self::Neuroticism => "NEUROTICISM",
        }
    }
}

impl fmt::Display for BigFiveTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BigFiveTrait {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_uppercase();
        BigFiveTrait::ALL
            .into_iter()
            .find(|t| t.as_str() == label)
            .ok_or_else(|| ValidationError::UnknownTrait(s.to_string()))
    }
}

/// A validated O*NET-SOC occupation code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OnetCode(String);

impl OnetCode {
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        if ONET_CODE_REGEX.is_match(code) {
            Ok(Self(code.to_string()))
        } else {
            Err(ValidationError::InvalidOnetCode(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OnetCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OnetCode> for String {
    fn from(code: OnetCode) -> Self {
        code.0
    }
}

impl fmt::Display for OnetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Standard taxonomy mappings attached to a competency.
///
/// At most one of each kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardMappings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onet_code: Option<OnetCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esco_uri: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub big_five: Option<BigFiveTrait>,
}

impl StandardMappings {
    pub fn has_esco(&self) -> bool {
        self.esco_uri.is_some()
    }

    pub fn has_big_five(&self) -> bool {
        self.big_five.is_some()
    }
}

/// Parse an ESCO concept URI
pub fn parse_esco_uri(uri: &str) -> Result<Url, ValidationError> {
    Url::parse(uri.trim()).map_err(|_| ValidationError::InvalidEscoUri(uri.to_string()))
}

/// A competency being assessed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competency {
    pub id: CompetencyId,
    pub name: String,
    #[serde(default)]
    pub mappings: StandardMappings,
}

impl Competency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CompetencyId::new(),
            name: name.into(),
            mappings: StandardMappings::default(),
        }
    }
}

/// An observable behavior that evidences a competency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralIndicator {
    pub id: IndicatorId,
    pub competency_id: CompetencyId,
    /// Relative weight, never negative
    pub weight: f64,
    pub active: bool,
}

impl BehavioralIndicator {
    pub fn new(competency_id: CompetencyId, weight: f64) -> Self {
        Self {
            id: IndicatorId::new(),
            competency_id,
            weight: weight.max(0.0),
            active: true,
        }
    }
}
