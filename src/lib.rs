//! ndoc: documentation generator for `.ndoc` module descriptions.
//!
//! A `.ndoc` file documents one module and a flat list of functions, written
//! either in the canonical line grammar or in a Markdown-flavored dialect:
//!
//! ```text
//! [module: Math]                        # Math
//! desc: Math utilities.                 Math utilities.
//! [function: add]                       ## add
//! param: a (number) - First operand     - **a** (`number`): First operand
//! return: number - The sum              **Returns**: `number` - The sum
//! ```
//!
//! # Architecture
//!
//! 1. **Model** ([`model`]): Document / FunctionDoc / Param / Return
//! 2. **Parser** ([`parser`]): Markdown normalizer feeding the canonical parser
//! 3. **Render** ([`render`]): HTML fragments and page shell, JSON, Markdown
//! 4. **Build** ([`build`]): static site output
//! 5. **Serve** ([`serve`], [`watch`]): development server with live reload

pub mod build;
pub mod config;
pub mod model;
pub mod parser;
pub mod render;
pub mod serve;
pub mod watch;

pub use model::{Document, FunctionDoc, ModuleDoc, Param, Return};
pub use parser::{load, load_with_diagnostics, normalize, parse, parse_with_diagnostics};
