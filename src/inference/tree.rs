//! Module tree types
//!
//! Nodes carry an aggregated text buffer that feeds the summarizer. The
//! buffer is readable but only the inference fold appends to it.

use super::names::normalize_name;
use std::collections::HashMap;

/// A subsection within a module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleNode {
    pub name: String,
    pub description: String,
    text: String,
}

impl SubmoduleNode {
    fn new(name: String) -> Self {
        Self {
            name,
            description: String::new(),
            text: String::new(),
        }
    }

    /// Aggregated source text in encounter order
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn append_text(&mut self, text: &str) {
        append_to_buffer(&mut self.text, text);
    }
}

/// A top-level documentation section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNode {
    pub name: String,
    pub description: String,

    /// Submodules in first-encountered order
    pub submodules: Vec<SubmoduleNode>,

    text: String,
    submodule_index: HashMap<String, usize>,
}

impl ModuleNode {
    fn new(name: String) -> Self {
        Self {
            name,
            description: String::new(),
            submodules: Vec::new(),
            text: String::new(),
            submodule_index: HashMap::new(),
        }
    }

    /// Aggregated source text in encounter order
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Finds a submodule by normalized name
    pub fn submodule(&self, name: &str) -> Option<&SubmoduleNode> {
        self.submodule_index
            .get(&normalize_name(name))
            .map(|&index| &self.submodules[index])
    }

    pub(crate) fn append_text(&mut self, text: &str) {
        append_to_buffer(&mut self.text, text);
    }

    /// Opens the named submodule, reusing an existing one with the same
    /// normalized name. Returns its index.
    pub(crate) fn open_submodule(&mut self, name: String) -> usize {
        let key = normalize_name(&name);
        if let Some(&index) = self.submodule_index.get(&key) {
            return index;
        }

        let index = self.submodules.len();
        self.submodules.push(SubmoduleNode::new(name));
        self.submodule_index.insert(key, index);
        index
    }
}

/// The module tree of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Modules in first-encountered order
    pub modules: Vec<ModuleNode>,

    /// Heading level treated as module level, if any heading was seen
    pub module_level: Option<u8>,

    /// Text blocks discarded for lack of an enclosing heading
    pub orphan_blocks: usize,

    module_index: HashMap<String, usize>,
}

impl ExtractionResult {
    pub fn new(module_level: Option<u8>) -> Self {
        Self {
            module_level,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Finds a module by normalized name
    pub fn module(&self, name: &str) -> Option<&ModuleNode> {
        self.module_index
            .get(&normalize_name(name))
            .map(|&index| &self.modules[index])
    }

    pub fn submodule_count(&self) -> usize {
        self.modules.iter().map(|module| module.submodules.len()).sum()
    }

    /// Opens the named module, reusing an existing one with the same
    /// normalized name. Returns its index.
    pub(crate) fn open_module(&mut self, name: String) -> usize {
        let key = normalize_name(&name);
        if let Some(&index) = self.module_index.get(&key) {
            return index;
        }

        let index = self.modules.len();
        self.modules.push(ModuleNode::new(name));
        self.module_index.insert(key, index);
        index
    }
}

fn append_to_buffer(buffer: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !buffer.is_empty() {
        buffer.push(' ');
    }
    buffer.push_str(text);
}
