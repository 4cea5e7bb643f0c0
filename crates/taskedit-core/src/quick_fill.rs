//! Quick-fill modes, types and the (mode, type) value lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::TableError;

/// Payment mode written into the "mode" column
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickFillMode {
    Paypal,
    PaypalPopnow,
}

impl QuickFillMode {
    pub const ALL: [QuickFillMode; 2] = [QuickFillMode::Paypal, QuickFillMode::PaypalPopnow];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuickFillMode::Paypal => "paypal",
            QuickFillMode::PaypalPopnow => "paypalpopnow",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl Default for QuickFillMode {
    fn default() -> Self {
        QuickFillMode::Paypal
    }
}

impl fmt::Display for QuickFillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickFillMode {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuickFillMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| TableError::validation(format!("Unknown mode '{}'", s)))
    }
}

/// Task type selecting which value gets written
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FillType {
    Has,
    Mac,
    Bie,
}

impl FillType {
    pub const ALL: [FillType; 3] = [FillType::Has, FillType::Mac, FillType::Bie];

    pub fn as_str(&self) -> &'static str {
        match self {
            FillType::Has => "HAS",
            FillType::Mac => "MAC",
            FillType::Bie => "BIE",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl Default for FillType {
    fn default() -> Self {
        FillType::Has
    }
}

impl fmt::Display for FillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FillType {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FillType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TableError::validation(format!("Unknown type '{}'", s)))
    }
}

/// Values shipped with the editor
const BUILTIN: [(QuickFillMode, [(FillType, &str); 3]); 2] = [
    (
        QuickFillMode::Paypal,
        [
            (FillType::Has, "1372"),
            (FillType::Mac, "675"),
            (FillType::Bie, "2155"),
        ],
    ),
    (
        QuickFillMode::PaypalPopnow,
        [
            (FillType::Has, "50"),
            (FillType::Mac, "40"),
            (FillType::Bie, "195"),
        ],
    ),
];

/// Errors raised while loading a lookup table from configuration
#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    #[error("Quick-fill table is missing a value for ({mode}, {fill_type})")]
    MissingEntry {
        mode: QuickFillMode,
        fill_type: FillType,
    },

    #[error("Invalid quick-fill table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exhaustive (mode, type) -> value lookup.
///
/// Every pair always has a value; incomplete tables are rejected when built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<QuickFillMode, HashMap<FillType, String>>")]
#[serde(into = "HashMap<QuickFillMode, HashMap<FillType, String>>")]
pub struct QuickFillTable {
    values: [[String; 3]; 2],
}

impl QuickFillTable {
    /// Build from a nested map, requiring every (mode, type) pair
    pub fn from_map(
        map: &HashMap<QuickFillMode, HashMap<FillType, String>>,
    ) -> Result<Self, LookupError> {
        let mut values: [[String; 3]; 2] = Default::default();
        for mode in QuickFillMode::ALL {
            for fill_type in FillType::ALL {
                let value = map
                    .get(&mode)
                    .and_then(|types| types.get(&fill_type))
                    .ok_or(LookupError::MissingEntry { mode, fill_type })?;
                values[mode.index()][fill_type.index()] = value.clone();
            }
        }
        Ok(Self { values })
    }

    /// Parse a JSON object of the form `{"paypal": {"HAS": "1372", ...}, ...}`
    pub fn from_json(json: &str) -> Result<Self, LookupError> {
        let map: HashMap<QuickFillMode, HashMap<FillType, String>> = serde_json::from_str(json)?;
        Self::from_map(&map)
    }

    pub fn value(&self, mode: QuickFillMode, fill_type: FillType) -> &str {
        &self.values[mode.index()][fill_type.index()]
    }

    pub fn to_map(&self) -> HashMap<QuickFillMode, HashMap<FillType, String>> {
        QuickFillMode::ALL
            .into_iter()
            .map(|mode| {
                let types = FillType::ALL
                    .into_iter()
                    .map(|t| (t, self.value(mode, t).to_string()))
                    .collect();
                (mode, types)
            })
            .collect()
    }
}

impl Default for QuickFillTable {
    fn default() -> Self {
        let mut values: [[String; 3]; 2] = Default::default();
        for (mode, entries) in BUILTIN {
            for (fill_type, value) in entries {
                values[mode.index()][fill_type.index()] = value.to_string();
            }
        }
        Self { values }
    }
}

impl TryFrom<HashMap<QuickFillMode, HashMap<FillType, String>>> for QuickFillTable {
    type Error = LookupError;

    fn try_from(map: HashMap<QuickFillMode, HashMap<FillType, String>>) -> Result<Self, Self::Error> {
        Self::from_map(&map)
    }
}

impl From<QuickFillTable> for HashMap<QuickFillMode, HashMap<FillType, String>> {
    fn from(table: QuickFillTable) -> Self {
        table.to_map()
    }
}
