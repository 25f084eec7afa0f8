//! Output formatting.

use crate::cli::OutputFormat;
use vue_class_transformer::TransformOutcome;

/// Where a rendered outcome should be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// stdout, or the `--out` file when given.
    Result,
    /// stderr.
    Diagnostic,
}

/// Renders transform outcomes.
pub struct Printer {
    format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Renders an outcome and picks where it belongs.
    pub fn render(&self, outcome: &TransformOutcome, input_name: &str) -> (String, Target) {
        match self.format {
            OutputFormat::Human => Self::format_human(outcome, input_name),
            OutputFormat::Json => (Self::format_json(outcome), Target::Result),
        }
    }

    fn format_human(outcome: &TransformOutcome, input_name: &str) -> (String, Target) {
        match outcome {
            TransformOutcome::Success { code } => {
                let mut code = code.clone();
                if !code.is_empty() && !code.ends_with('\n') {
                    code.push('\n');
                }
                (code, Target::Result)
            }
            TransformOutcome::Error { message } => (
                format!("{input_name}\nError: {message}\n"),
                Target::Diagnostic,
            ),
        }
    }

    fn format_json(outcome: &TransformOutcome) -> String {
        let mut json = serde_json::to_string_pretty(outcome).unwrap_or_default();
        json.push('\n');
        json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn success() -> TransformOutcome {
        TransformOutcome::Success {
            code: "const a = ref(1);".to_string(),
        }
    }

    fn error() -> TransformOutcome {
        TransformOutcome::Error {
            message: "Decorator can only contain one argument".to_string(),
        }
    }

    #[test]
    fn test_format_human_success() {
        let (text, target) = Printer::new(OutputFormat::Human).render(&success(), "A.ts");
        assert_eq!(text, "const a = ref(1);\n");
        assert_eq!(target, Target::Result);
    }

    #[test]
    fn test_format_human_error() {
        let (text, target) = Printer::new(OutputFormat::Human).render(&error(), "A.ts");
        assert_eq!(text, "A.ts\nError: Decorator can only contain one argument\n");
        assert_eq!(target, Target::Diagnostic);
    }

    #[test]
    fn test_format_json() {
        let printer = Printer::new(OutputFormat::Json);

        let (text, target) = printer.render(&success(), "A.ts");
        assert_eq!(target, Target::Result);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "success");
        assert_eq!(value["code"], "const a = ref(1);");

        let (text, target) = printer.render(&error(), "A.ts");
        assert_eq!(target, Target::Result);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "error");
    }
}
