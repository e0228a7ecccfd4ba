//! Data model for a parsed `.ndoc` file — format-agnostic.

use serde::Serialize;

/// Complete parsed document: one module and its functions.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Document {
    pub module: ModuleDoc,
}

/// Module header plus the functions declared after it.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ModuleDoc {
    /// `[module: NAME]`
    pub name: String,
    /// First `desc:` before any function
    pub desc: String,
    /// Declaration order; duplicate names are kept
    pub functions: Vec<FunctionDoc>,
}

/// A single documented function.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct FunctionDoc {
    pub name: String,
    pub desc: String,
    pub params: Vec<Param>,
    /// Last `return:` line wins
    #[serde(rename = "return")]
    pub returns: Return,
}

impl FunctionDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Parsed `param: NAME (TYPE) - DESC` entry.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub desc: String,
}

/// Parsed `return: TYPE - DESC` entry.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Return {
    #[serde(rename = "type")]
    pub ty: String,
    pub desc: String,
}

impl Return {
    /// True while no `return:` line has been applied.
    pub fn is_empty(&self) -> bool {
        self.ty.is_empty() && self.desc.is_empty()
    }
}
