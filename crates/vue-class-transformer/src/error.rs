//! Transform error types.

use thiserror::Error;

/// Which text failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxStage {
    /// The user's class component.
    Source,
    /// The synthesized setup-script text, before reference rewriting.
    Generated,
}

/// An error that aborted a transform.
///
/// Every variant renders as a single human-readable message; no partial
/// output is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The source or the synthesized intermediate text failed to parse.
    #[error("{}{message} ({line}:{column})", stage_prefix(.stage))]
    Syntax {
        /// Which text was being parsed.
        stage: SyntaxStage,
        /// 1-indexed line of the offending token.
        line: usize,
        /// 1-indexed column of the offending token.
        column: usize,
        /// The parser's description of the problem.
        message: String,
    },

    /// A decorator carried an invalid configuration.
    #[error("{0}")]
    Configuration(String),

    /// The formatter rejected the generated text.
    #[error("{0}")]
    Format(String),

    /// Any other failure.
    #[error("{}", .0.as_deref().unwrap_or("Unknown error"))]
    Unknown(Option<String>),
}

fn stage_prefix(stage: &SyntaxStage) -> &'static str {
    match stage {
        SyntaxStage::Source => "",
        SyntaxStage::Generated => "Generated code is invalid: ",
    }
}

impl TransformError {
    /// The error raised when `@Prop(...)` has more than one argument.
    pub fn too_many_decorator_arguments() -> Self {
        Self::Configuration("Decorator can only contain one argument".to_string())
    }

    /// Builds an [`TransformError::Unknown`] from a panic payload.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .filter(|s| !s.trim().is_empty());
        Self::Unknown(message)
    }
}
