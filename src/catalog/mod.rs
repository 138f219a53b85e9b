use crate::error::CatalogError;
use crate::port::CalculatorDefinition;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

mod builtin;

/// A calculator listed under a module, as shown in the component palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub key: String,
    pub name: String,
}

/// A group of calculators (electrical, mechanical, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogModule {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub calculators: Vec<CatalogEntry>,
}

/// On-disk catalog format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub modules: Vec<CatalogModule>,
    #[serde(default)]
    pub calculators: AHashMap<String, CalculatorDefinition>,
}

/// Static calculator metadata: module grouping plus per-calculator field and
/// output declarations, keyed by calculator key.
#[derive(Debug, Clone, Default)]
pub struct CalculatorCatalog {
    modules: Vec<CatalogModule>,
    definitions: AHashMap<String, Arc<CalculatorDefinition>>,
    fallback: Arc<CalculatorDefinition>,
}

impl CalculatorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The calculators the engine ships with.
    pub fn builtin() -> Self {
        Self::from_document(builtin::document())
    }

    pub fn from_document(doc: CatalogDocument) -> Self {
        let definitions = doc
            .calculators
            .into_iter()
            .map(|(key, def)| (key, Arc::new(def)))
            .collect();
        Self {
            modules: doc.modules,
            definitions,
            fallback: Arc::new(CalculatorDefinition::default()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(doc))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Adds or replaces a calculator under the given module.
    pub fn with_calculator(
        mut self,
        module_key: &str,
        calc_key: &str,
        name: &str,
        definition: CalculatorDefinition,
    ) -> Self {
        let entry = CatalogEntry {
            key: calc_key.to_string(),
            name: name.to_string(),
        };
        match self.modules.iter_mut().find(|m| m.key == module_key) {
            Some(module) => {
                module.calculators.retain(|c| c.key != calc_key);
                module.calculators.push(entry);
            }
            None => self.modules.push(CatalogModule {
                key: module_key.to_string(),
                name: module_key.to_string(),
                calculators: vec![entry],
            }),
        }
        self.definitions
            .insert(calc_key.to_string(), Arc::new(definition));
        self
    }

    pub fn modules(&self) -> &[CatalogModule] {
        &self.modules
    }

    pub fn definition(&self, calc_key: &str) -> Option<&Arc<CalculatorDefinition>> {
        self.definitions.get(calc_key)
    }

    /// Returns the declared metadata, or the single-input/single-output default
    /// for calculators without metadata.
    pub fn definition_or_default(&self, calc_key: &str) -> Arc<CalculatorDefinition> {
        self.definitions
            .get(calc_key)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.fallback))
    }

    /// Resolves the display name of `calc_key` inside `module_key`.
    pub fn lookup(&self, module_key: &str, calc_key: &str) -> Result<&CatalogEntry, CatalogError> {
        let module = self
            .modules
            .iter()
            .find(|m| m.key == module_key)
            .ok_or_else(|| CatalogError::ModuleNotFound(module_key.to_string()))?;
        module
            .calculators
            .iter()
            .find(|c| c.key == calc_key)
            .ok_or_else(|| CatalogError::CalculatorNotFound {
                module_key: module_key.to_string(),
                calc_key: calc_key.to_string(),
            })
    }
}
