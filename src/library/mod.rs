use crate::document::{IntoWorkflow, WorkflowDocument};
use crate::error::PersistenceError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

mod featured;

pub use featured::featured_examples;

/// A documented multi-step workflow from `workflows.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryWorkflow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

/// A worked example from `examples.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryExample {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub scenario: String,
    #[serde(default)]
    pub inputs: AHashMap<String, serde_json::Value>,
    #[serde(default)]
    pub outputs: AHashMap<String, serde_json::Value>,
}

/// A ready-to-load example graph.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedExample {
    pub key: String,
    pub name: String,
    pub description: String,
    pub workflow: WorkflowDocument,
}

impl IntoWorkflow for FeaturedExample {
    fn into_workflow(self) -> Result<WorkflowDocument, PersistenceError> {
        Ok(self.workflow)
    }
}

#[derive(Debug, Default, Deserialize)]
struct WorkflowsFile {
    #[serde(default)]
    workflows: Vec<LibraryWorkflow>,
}

#[derive(Debug, Default, Deserialize)]
struct ExamplesFile {
    #[serde(default)]
    examples: Vec<LibraryExample>,
}

/// Search hits across the three collections.
#[derive(Debug, Default)]
pub struct SearchResults<'a> {
    pub featured: Vec<&'a FeaturedExample>,
    pub workflows: Vec<&'a LibraryWorkflow>,
    pub examples: Vec<&'a LibraryExample>,
}

impl SearchResults<'_> {
    pub fn is_empty(&self) -> bool {
        self.featured.is_empty() && self.workflows.is_empty() && self.examples.is_empty()
    }
}

/// Read-only discovery data: the featured example graphs plus the workflow
/// and example libraries.
#[derive(Debug, Clone, Default)]
pub struct WorkflowLibrary {
    pub featured: Vec<FeaturedExample>,
    pub workflows: Vec<LibraryWorkflow>,
    pub examples: Vec<LibraryExample>,
}

impl WorkflowLibrary {
    /// Only the built-in featured examples.
    pub fn builtin() -> Self {
        Self {
            featured: featured_examples(),
            ..Self::default()
        }
    }

    /// Loads `workflows.json` and `examples.json` from `dir` on top of the
    /// built-ins. A missing or malformed file leaves that list empty.
    pub fn load_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut library = Self::builtin();
        library.workflows = load_list::<WorkflowsFile>(&dir.join("workflows.json"))
            .map(|f| f.workflows)
            .unwrap_or_default();
        library.examples = load_list::<ExamplesFile>(&dir.join("examples.json"))
            .map(|f| f.examples)
            .unwrap_or_default();
        tracing::info!(
            "Loaded {} library workflows and {} examples from {}",
            library.workflows.len(),
            library.examples.len(),
            dir.display()
        );
        library
    }

    pub fn with_workflows_json(mut self, json: &str) -> Result<Self, PersistenceError> {
        let file: WorkflowsFile = serde_json::from_str(json)?;
        self.workflows = file.workflows;
        Ok(self)
    }

    pub fn with_examples_json(mut self, json: &str) -> Result<Self, PersistenceError> {
        let file: ExamplesFile = serde_json::from_str(json)?;
        self.examples = file.examples;
        Ok(self)
    }

    pub fn featured(&self, key: &str) -> Option<&FeaturedExample> {
        self.featured.iter().find(|e| e.key == key)
    }

    pub fn workflow(&self, id: &str) -> Option<&LibraryWorkflow> {
        self.workflows.iter().find(|w| w.id == id)
    }

    pub fn example(&self, id: &str) -> Option<&LibraryExample> {
        self.examples.iter().find(|e| e.id == id)
    }

    /// Case-insensitive substring search. An empty term matches everything.
    pub fn search(&self, term: &str) -> SearchResults<'_> {
        let term = term.trim().to_lowercase();
        let matches = |text: &str| term.is_empty() || text.to_lowercase().contains(&term);

        SearchResults {
            featured: self
                .featured
                .iter()
                .filter(|e| matches(&e.name) || matches(&e.description))
                .collect(),
            workflows: self
                .workflows
                .iter()
                .filter(|w| matches(&w.title) || matches(&w.description) || matches(&w.domain))
                .collect(),
            examples: self
                .examples
                .iter()
                .filter(|e| matches(&e.title) || matches(&e.scenario) || matches(&e.domain))
                .collect(),
        }
    }
}

fn load_list<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Library file {} unavailable: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Library file {} is malformed: {}", path.display(), e);
            None
        }
    }
}
