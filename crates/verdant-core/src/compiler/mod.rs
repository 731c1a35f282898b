//! # Verdant Template Compiler
//!
//! The pipeline treats compilation as a black box behind
//! [`TemplateCompiler`]: markup in, [`RenderFn`] out, or a
//! [`TemplateSyntaxError`]. [`MarkupCompiler`] is the built-in
//! implementation.
//!
//! ## Template dialect
//!
//! - exactly one root element
//! - `{{ path }}` text interpolation with dotted paths, optionally piped
//!   through filters: `{{ price | currency }}`
//! - `:attr="path"` (or `v-bind:attr`) binds an attribute; `null`/`false`
//!   omit it, `true` renders it as `attr="attr"`
//! - `v-name="path"` applies a registered directive to the element
pub(crate) mod codegen;
pub mod error;
pub mod parser;

use std::sync::Arc;

use crate::compiler::error::TemplateSyntaxError;
use crate::compiler::parser::Node;
use crate::render::RenderFn;

/// Compiles markup into a render function
pub trait TemplateCompiler: Send + Sync {
    fn name(&self) -> &'static str {
        "compiler"
    }

    fn compile(&self, markup: &str) -> Result<RenderFn, TemplateSyntaxError>;
}

/// Built-in compiler for the template dialect described in the module docs
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupCompiler;

impl TemplateCompiler for MarkupCompiler {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn compile(&self, markup: &str) -> Result<RenderFn, TemplateSyntaxError> {
        let roots = parser::parse_fragment(markup)?;

        let mut root = None;
        for node in &roots {
            match node {
                Node::Text(text) => {
                    return Err(TemplateSyntaxError::new(
                        markup,
                        text.position,
                        "text outside the root element",
                    ));
                }
                Node::Element(el) if root.is_some() => {
                    return Err(TemplateSyntaxError::new(
                        markup,
                        el.position,
                        "template must contain exactly one root element",
                    ));
                }
                Node::Element(el) => root = Some(el),
            }
        }
        let root = root
            .ok_or_else(|| TemplateSyntaxError::new(markup, 0, "template has no root element"))?;

        let template = Arc::new(codegen::generate(root, markup)?);
        log::debug!("Compiled template rooted at <{}>", root.tag);
        Ok(RenderFn::new(move |vm| codegen::render(&template, vm)))
    }
}

/// Compile with the built-in [`MarkupCompiler`]
pub fn compile_to_function(markup: &str) -> Result<RenderFn, TemplateSyntaxError> {
    MarkupCompiler.compile(markup)
}

// Test module declaration
#[cfg(test)]
mod tests;
