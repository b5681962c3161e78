//! The Canon curriculum: five fixed modules, their lessons, and the word
//! limit of each module's gating assignment.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of modules in the Canon.
pub const MODULE_COUNT: usize = 5;

/// A validated Canon module number (`1..=5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ModuleNumber(u8);

impl ModuleNumber {
    pub const FIRST: ModuleNumber = ModuleNumber(1);
    pub const LAST: ModuleNumber = ModuleNumber(MODULE_COUNT as u8);

    /// Returns `None` when `n` is outside `1..=5`.
    pub fn new(n: i64) -> Option<Self> {
        if (1..=MODULE_COUNT as i64).contains(&n) {
            Some(Self(n as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position, always `< MODULE_COUNT`.
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }

    /// The module that gates this one, or `None` for module 1.
    pub fn previous(self) -> Option<Self> {
        if self.0 > 1 {
            Some(Self(self.0 - 1))
        } else {
            None
        }
    }

    /// All module numbers in order.
    pub fn all() -> impl Iterator<Item = ModuleNumber> {
        (1..=MODULE_COUNT as u8).map(ModuleNumber)
    }
}

impl TryFrom<i64> for ModuleNumber {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid module number {value}. Must be between 1 and {MODULE_COUNT}"
            ))
        })
    }
}

impl TryFrom<i16> for ModuleNumber {
    type Error = CoreError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<ModuleNumber> for i16 {
    fn from(value: ModuleNumber) -> Self {
        i16::from(value.0)
    }
}

impl From<ModuleNumber> for i64 {
    fn from(value: ModuleNumber) -> Self {
        i64::from(value.0)
    }
}

impl std::fmt::Display for ModuleNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static description of one Canon module.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSpec {
    pub number: u8,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub lessons: &'static [&'static str],
    pub assignment_title: &'static str,
    /// Maximum word count for the module's assignment.
    pub word_limit: usize,
}

impl ModuleSpec {
    pub fn total_lessons(&self) -> usize {
        self.lessons.len()
    }
}

pub static CANON_MODULES: [ModuleSpec; MODULE_COUNT] = [
    ModuleSpec {
        number: 1,
        title: "Strategic Foundations",
        subtitle: "What Strategy Actually Is",
        lessons: &[
            "The Strategy Confusion",
            "Diagnosis: Seeing the Situation Clearly",
            "Guiding Policy: The Heart of Strategy",
            "Coherent Actions: Strategy in Motion",
        ],
        assignment_title: "Strategy Diagnosis",
        word_limit: 500,
    },
    ModuleSpec {
        number: 2,
        title: "Competitive Positioning",
        subtitle: "Where and How to Win",
        lessons: &[
            "The Competitive Arena",
            "Sustainable Competitive Advantage",
            "Positioning Choices",
            "Game Theory Basics",
        ],
        assignment_title: "Competitive Position Analysis",
        word_limit: 600,
    },
    ModuleSpec {
        number: 3,
        title: "Strategic Decision-Making",
        subtitle: "Thinking Under Uncertainty",
        lessons: &[
            "Uncertainty Types",
            "Decision Frameworks",
            "Strategic Options",
            "Judgment and Bias",
        ],
        assignment_title: "Decision Analysis",
        word_limit: 600,
    },
    ModuleSpec {
        number: 4,
        title: "Execution & Adaptation",
        subtitle: "Strategy in the Real World",
        lessons: &[
            "The Execution Gap",
            "Objectives and Key Results",
            "Adaptive Strategy",
            "Learning Loops",
        ],
        assignment_title: "Execution Plan",
        word_limit: 500,
    },
    ModuleSpec {
        number: 5,
        title: "Strategic Synthesis",
        subtitle: "Your Strategic Doctrine",
        lessons: &[
            "Integration",
            "Personal Strategic Patterns",
            "Strategic Principles",
            "Creating Your Strategic Doctrine",
        ],
        assignment_title: "Your Strategic Doctrine",
        word_limit: 800,
    },
];

/// Look up the static description of a module.
pub fn module_spec(module: ModuleNumber) -> &'static ModuleSpec {
    &CANON_MODULES[module.index()]
}
