//! Closed category and priority enumerations with display metadata.
//!
//! # Responsibility
//! - Name the fixed category and priority sets.
//! - Map every variant to its icon/label/color through a static table.
//!
//! # Invariants
//! - Wire names are lowercase and stable; they are the persisted form.
//! - Table order matches declaration order, so `variant as usize` indexes it.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Error returned when a wire name does not match any enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl Display for ParseEnumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl Error for ParseEnumError {}

/// Task category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Personal,
    Work,
    Shopping,
    Health,
    Education,
    Other,
}

/// Display metadata attached to each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMeta {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

const CATEGORY_META: [CategoryMeta; 6] = [
    CategoryMeta {
        label: "Personal",
        icon: "📋",
        color: "#e8eaf6",
    },
    CategoryMeta {
        label: "Work",
        icon: "💼",
        color: "#f3e5f5",
    },
    CategoryMeta {
        label: "Shopping",
        icon: "🛒",
        color: "#e0f2f1",
    },
    CategoryMeta {
        label: "Health",
        icon: "🏥",
        color: "#fce4ec",
    },
    CategoryMeta {
        label: "Education",
        icon: "🎓",
        color: "#fff3e0",
    },
    CategoryMeta {
        label: "Other",
        icon: "📦",
        color: "#f5f5f5",
    },
];

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Personal,
        Category::Work,
        Category::Shopping,
        Category::Health,
        Category::Education,
        Category::Other,
    ];

    /// Lowercase wire name, also used for lexicographic sorting.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Education => "education",
            Self::Other => "other",
        }
    }

    pub fn meta(self) -> &'static CategoryMeta {
        &CATEGORY_META[self as usize]
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| ParseEnumError::new("category", value))
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Display metadata attached to each priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityMeta {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    /// Severity rank; higher sorts first.
    pub rank: u8,
}

const PRIORITY_META: [PriorityMeta; 3] = [
    PriorityMeta {
        label: "High",
        icon: "🔴",
        color: "#ff4757",
        rank: 3,
    },
    PriorityMeta {
        label: "Medium",
        icon: "🟡",
        color: "#ffa502",
        rank: 2,
    },
    PriorityMeta {
        label: "Low",
        icon: "🟢",
        color: "#2ed573",
        rank: 1,
    },
];

impl Priority {
    /// All priorities in declaration order (most severe first).
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn meta(self) -> &'static PriorityMeta {
        &PRIORITY_META[self as usize]
    }

    pub fn rank(self) -> u8 {
        self.meta().rank
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == value)
            .ok_or_else(|| ParseEnumError::new("priority", value))
    }
}
