//! Serialized module records
//!
//! Each module serializes as
//! `{"module": ..., "Description": ..., "Submodules": {name: description, ...}}`
//! with submodules in first-encountered order.

use crate::inference::{ExtractionResult, ModuleNode};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One module in the output sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRecord {
    pub module: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Submodules")]
    pub submodules: SubmoduleMap,
}

/// Submodule name to description, serialized as a map in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmoduleMap(Vec<(String, String)>);

impl SubmoduleMap {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, desc)| (name.as_str(), desc.as_str()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, desc)| desc.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SubmoduleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, description) in &self.0 {
            map.serialize_entry(name, description)?;
        }
        map.end()
    }
}

impl From<&ModuleNode> for ModuleRecord {
    fn from(node: &ModuleNode) -> Self {
        Self {
            module: node.name.clone(),
            description: node.description.clone(),
            submodules: SubmoduleMap(
                node.submodules
                    .iter()
                    .map(|sub| (sub.name.clone(), sub.description.clone()))
                    .collect(),
            ),
        }
    }
}

/// Converts a module tree into output records, preserving order
pub fn to_records(result: &ExtractionResult) -> Vec<ModuleRecord> {
    result.modules.iter().map(ModuleRecord::from).collect()
}
