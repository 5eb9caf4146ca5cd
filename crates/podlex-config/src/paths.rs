use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_dictionary() -> PathBuf {
    PathBuf::from("public/dictionary.json")
}

fn default_curated() -> PathBuf {
    PathBuf::from("scripts/it-curated.json")
}

fn default_phrasal() -> PathBuf {
    PathBuf::from("scripts/phrasal-verbs-ru.json")
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PathsConfig {
    /// Artifact read at start and replaced at the end of a run
    #[serde(default = "default_dictionary")]
    pub dictionary: PathBuf,
    /// Hand-maintained glossary that always wins
    #[serde(default = "default_curated")]
    pub curated: PathBuf,
    #[serde(default = "default_phrasal")]
    pub phrasal: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            curated: default_curated(),
            phrasal: default_phrasal(),
        }
    }
}
