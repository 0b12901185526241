use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/"]
struct CatalogAssets;

/// Text used for a free speed test when no lesson is selected.
pub const DEFAULT_SPEED_TEST_TEXT: &str = "The quick brown fox jumps over the lazy dog. \
This sentence contains every letter in the English alphabet.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(anyhow!(
                "unknown difficulty {other:?} (expected beginner, intermediate or advanced)"
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    pub text: String,
    #[serde(default)]
    pub category: String,
    /// Minutes.
    #[serde(default)]
    pub estimated_time: u32,
}

/// Ordered, read-only list of lessons.
#[derive(Clone, Debug, Default)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    /// The catalog bundled into the binary.
    pub fn builtin() -> Result<Self> {
        let file = CatalogAssets::get("lessons.json")
            .ok_or_else(|| anyhow!("bundled lessons.json is missing"))?;
        let content = std::str::from_utf8(file.data.as_ref())
            .context("bundled lessons.json is not UTF-8")?;
        Self::from_json(content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let lessons: Vec<Lesson> =
            serde_json::from_str(json).context("failed to parse lesson catalog")?;
        for (i, lesson) in lessons.iter().enumerate() {
            if lessons[..i].iter().any(|l| l.id == lesson.id) {
                bail!("duplicate lesson id {:?}", lesson.id);
            }
        }
        Ok(Self { lessons })
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn get(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    /// Lessons at `difficulty`, in catalog order; `None` keeps everything.
    pub fn filter(&self, difficulty: Option<Difficulty>) -> Vec<&Lesson> {
        self.lessons
            .iter()
            .filter(|l| difficulty.is_none_or(|d| l.difficulty == d))
            .collect()
    }
}
