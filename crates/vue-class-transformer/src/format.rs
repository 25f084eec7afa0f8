//! Final pretty-printing of the generated setup script.

use crate::ast::{emit_module, parse_module};
use crate::error::{SyntaxStage, TransformError};
use swc_common::sync::Lrc;
use swc_common::SourceMap;

/// Turns raw generated text into its canonical formatting.
///
/// A formatter must reject text it cannot parse with
/// [`TransformError::Format`].
pub trait Formatter {
    fn format(&self, text: &str) -> Result<String, TransformError>;
}

/// Formats by parsing with swc and printing the module back out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwcFormatter;

impl Formatter for SwcFormatter {
    fn format(&self, text: &str) -> Result<String, TransformError> {
        let cm: Lrc<SourceMap> = Default::default();
        let parsed = parse_module(&cm, "setup.ts", text, SyntaxStage::Generated)
            .map_err(|err| match err {
                TransformError::Syntax {
                    line,
                    column,
                    message,
                    ..
                } => TransformError::Format(format!("{message} ({line}:{column})")),
                other => other,
            })?;
        Ok(emit_module(&cm, &parsed))
    }
}

impl<F: Formatter + ?Sized> Formatter for &F {
    fn format(&self, text: &str) -> Result<String, TransformError> {
        (**self).format(text)
    }
}
