//! Puzzle type tags and the catalogue of built-in and user-defined puzzles.
//!
//! Solve records carry the puzzle as a free-form tag (`"3x3"`, `"Pyraminx"`,
//! or the name of a custom puzzle). `CubeType` parses those tags
//! case-insensitively and keeps anything it does not recognise verbatim.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CubeType {
    TwoByTwo,
    #[default]
    ThreeByThree,
    FourByFour,
    FiveByFive,
    SixBySix,
    SevenBySeven,
    Pyraminx,
    Megaminx,
    Skewb,
    Square1,
    /// A tag that is not one of the built-in puzzles.
    Custom(String),
}

/// Built-in puzzles in display order.
pub const BUILTIN_CUBE_TYPES: [CubeType; 10] = [
    CubeType::TwoByTwo,
    CubeType::ThreeByThree,
    CubeType::FourByFour,
    CubeType::FiveByFive,
    CubeType::SixBySix,
    CubeType::SevenBySeven,
    CubeType::Pyraminx,
    CubeType::Megaminx,
    CubeType::Skewb,
    CubeType::Square1,
];

impl CubeType {
    /// Canonical tag as stored in solve records.
    pub fn as_str(&self) -> &str {
        match self {
            CubeType::TwoByTwo => "2x2",
            CubeType::ThreeByThree => "3x3",
            CubeType::FourByFour => "4x4",
            CubeType::FiveByFive => "5x5",
            CubeType::SixBySix => "6x6",
            CubeType::SevenBySeven => "7x7",
            CubeType::Pyraminx => "Pyraminx",
            CubeType::Megaminx => "Megaminx",
            CubeType::Skewb => "Skewb",
            CubeType::Square1 => "Square-1",
            CubeType::Custom(tag) => tag,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, CubeType::Custom(_))
    }

    fn icon(&self) -> &'static str {
        match self {
            CubeType::TwoByTwo => "🟩",
            CubeType::ThreeByThree => "🟥",
            CubeType::FourByFour => "🟦",
            CubeType::FiveByFive => "🟨",
            CubeType::SixBySix => "🟪",
            CubeType::SevenBySeven => "🟧",
            CubeType::Pyraminx => "🔺",
            CubeType::Megaminx => "⬟",
            CubeType::Skewb => "🔷",
            CubeType::Square1 => "◼️",
            CubeType::Custom(_) => "🧩",
        }
    }

    pub fn info(&self) -> CubeTypeInfo {
        CubeTypeInfo {
            cube_type: self.clone(),
            label: self.as_str().to_string(),
            icon: self.icon().to_string(),
            is_custom: self.is_custom(),
        }
    }
}

impl From<&str> for CubeType {
    fn from(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "2x2" => CubeType::TwoByTwo,
            "3x3" => CubeType::ThreeByThree,
            "4x4" => CubeType::FourByFour,
            "5x5" => CubeType::FiveByFive,
            "6x6" => CubeType::SixBySix,
            "7x7" => CubeType::SevenBySeven,
            "pyraminx" => CubeType::Pyraminx,
            "megaminx" => CubeType::Megaminx,
            "skewb" => CubeType::Skewb,
            "square-1" | "sq1" => CubeType::Square1,
            _ => CubeType::Custom(tag.to_string()),
        }
    }
}

impl From<String> for CubeType {
    fn from(tag: String) -> Self {
        CubeType::from(tag.as_str())
    }
}

impl From<CubeType> for String {
    fn from(cube_type: CubeType) -> Self {
        match cube_type {
            CubeType::Custom(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl From<&CubeType> for CubeType {
    fn from(cube_type: &CubeType) -> Self {
        cube_type.clone()
    }
}

impl FromStr for CubeType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CubeType::from(s))
    }
}

impl fmt::Display for CubeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata for a puzzle selector entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CubeTypeInfo {
    #[serde(rename = "type")]
    pub cube_type: CubeType,
    pub label: String,
    pub icon: String,
    #[serde(default)]
    pub is_custom: bool,
}

/// Selector entries for every built-in puzzle.
pub fn default_cube_types() -> Vec<CubeTypeInfo> {
    BUILTIN_CUBE_TYPES.iter().map(CubeType::info).collect()
}

/// A user-defined puzzle with its own move alphabet and scramble length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCubeType {
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub label: String,
    pub icon: String,
    pub scramble_length: usize,
    pub moves: Vec<String>,
}

impl CustomCubeType {
    pub fn cube_type(&self) -> CubeType {
        CubeType::from(self.type_name.as_str())
    }

    pub fn info(&self) -> CubeTypeInfo {
        CubeTypeInfo {
            cube_type: self.cube_type(),
            label: self.label.clone(),
            icon: self.icon.clone(),
            is_custom: true,
        }
    }
}
