//! The transform pipeline.

use crate::ast::{emit_module, parse_module};
use crate::error::{SyntaxStage, TransformError};
use crate::extract::Extractor;
use crate::format::{Formatter, SwcFormatter};
use crate::rewrite::{rewrite_module, RewriteNames};
use crate::synth::Synthesizer;
use crate::types::Entities;
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use swc_common::sync::Lrc;
use swc_common::SourceMap;
use tracing::{debug, trace};

const SOURCE_FILE: &str = "component.ts";
const SETUP_FILE: &str = "setup.ts";

/// Options for a transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformOptions {
    /// Drop declared types that the compiler can infer from the initializer.
    pub infer_types: bool,
    /// Re-emit the comments written above class members.
    pub show_comments: bool,
    /// Store naming convention. A field initialized by calling a function
    /// whose name ends with this suffix is bound as-is instead of wrapped in
    /// `ref`, and `this.<name>Store.x` is read without `.value`. `None` turns
    /// the rule off.
    pub store_suffix: Option<String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            infer_types: false,
            show_comments: false,
            store_suffix: Some("Store".to_string()),
        }
    }
}

/// A successful transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// The formatted `<script setup>` body.
    pub code: String,
}

/// Serializable result of a transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransformOutcome {
    Success { code: String },
    Error { message: String },
}

impl TransformOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Result<TransformOutput, TransformError>> for TransformOutcome {
    fn from(result: Result<TransformOutput, TransformError>) -> Self {
        match result {
            Ok(output) => Self::Success { code: output.code },
            Err(err) => Self::Error {
                message: err.to_string(),
            },
        }
    }
}

/// Runs the pipeline with a given formatter.
#[derive(Debug, Clone, Default)]
pub struct Transpiler<F = SwcFormatter> {
    formatter: F,
}

impl<F: Formatter> Transpiler<F> {
    pub fn new(formatter: F) -> Self {
        Self { formatter }
    }

    /// Transforms a class component into a `<script setup>` body.
    ///
    /// Any failure, including a panic inside the parser or printer, is
    /// returned as a [`TransformError`]; no partial output is produced.
    pub fn transform(
        &self,
        source: &str,
        options: &TransformOptions,
    ) -> Result<TransformOutput, TransformError> {
        let result = match catch_unwind(AssertUnwindSafe(|| self.run(source, options))) {
            Ok(result) => result,
            Err(payload) => Err(TransformError::from_panic(payload)),
        };

        if let Err(err) = &result {
            debug!(error = %err, "transform failed");
        }
        result
    }

    fn run(
        &self,
        source: &str,
        options: &TransformOptions,
    ) -> Result<TransformOutput, TransformError> {
        let cm: Lrc<SourceMap> = Default::default();

        let parsed = parse_module(&cm, SOURCE_FILE, source, SyntaxStage::Source)?;
        let entities = Extractor::new(&parsed.comments).extract(&parsed.module)?;
        debug!(
            props = entities.props.len(),
            emits = entities.emits.len(),
            composables = entities.composables.len(),
            reactives = entities.reactives.len(),
            functions = entities.functions.len(),
            computeds = entities.computeds.len(),
            "extracted entities"
        );

        let text = Synthesizer::new(&cm, options).synthesize(&entities);
        trace!(text = %text, "synthesized setup script");

        let mut setup = parse_module(&cm, SETUP_FILE, &text, SyntaxStage::Generated)?;
        let names = RewriteNames::from_entities(&entities, options);
        rewrite_module(&mut setup.module, &names);
        let generated = emit_module(&cm, &setup);
        debug!("rewrote self references");

        let code = self.formatter.format(&generated)?;
        Ok(TransformOutput { code })
    }
}

/// Transforms a class component with the default formatter.
pub fn transform(
    source: &str,
    options: &TransformOptions,
) -> Result<TransformOutput, TransformError> {
    Transpiler::new(SwcFormatter).transform(source, options)
}

/// Parses a class component and returns its classified members.
pub fn extract(source: &str) -> Result<Entities, TransformError> {
    let cm: Lrc<SourceMap> = Default::default();
    let parsed = parse_module(&cm, SOURCE_FILE, source, SyntaxStage::Source)?;
    Extractor::new(&parsed.comments).extract(&parsed.module)
}
