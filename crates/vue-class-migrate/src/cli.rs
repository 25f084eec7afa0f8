//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Migrate a Vue class component to a `<script setup>` body.
#[derive(Debug, Parser)]
#[command(name = "vue-class-migrate")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Class component source file (reads stdin when absent or `-`)
    pub input: Option<Utf8PathBuf>,

    /// Omit declared types the compiler can infer
    #[arg(long = "infer-types")]
    pub infer_types: bool,

    /// Keep comments written above class members
    #[arg(long = "show-comments")]
    pub show_comments: bool,

    /// Name suffix that marks store handles
    #[arg(long = "store-suffix", conflicts_with = "no_store_binding")]
    pub store_suffix: Option<String>,

    /// Treat store handles like any other field
    #[arg(long = "no-store-binding")]
    pub no_store_binding: bool,

    /// Options file (JSON); flags take precedence
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Write the result to a file instead of stdout
    #[arg(long)]
    pub out: Option<Utf8PathBuf>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Generated code only; errors go to stderr (default)
    #[default]
    Human,
    /// A JSON object tagged `success` or `error`
    Json,
}

impl Args {
    /// The input path, or `None` when reading stdin.
    pub fn input_path(&self) -> Option<&Utf8PathBuf> {
        self.input.as_ref().filter(|path| path.as_str() != "-")
    }

    /// A short name for the input in messages.
    pub fn input_name(&self) -> &str {
        self.input_path().map(|path| path.as_str()).unwrap_or("<stdin>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["vue-class-migrate"]);
        assert!(args.input_path().is_none());
        assert_eq!(args.input_name(), "<stdin>");
        assert_eq!(args.output, OutputFormat::Human);
        assert!(!args.infer_types);
        assert!(!args.show_comments);
        assert!(args.store_suffix.is_none());
        assert!(!args.no_store_binding);
    }

    #[test]
    fn test_dash_reads_stdin() {
        let args = Args::parse_from(["vue-class-migrate", "-"]);
        assert!(args.input_path().is_none());
    }

    #[test]
    fn test_input_file() {
        let args = Args::parse_from(["vue-class-migrate", "src/Counter.ts"]);
        assert_eq!(args.input_name(), "src/Counter.ts");
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "vue-class-migrate",
            "--infer-types",
            "--show-comments",
            "--store-suffix",
            "Repo",
            "--output",
            "json",
            "--out",
            "out.ts",
        ]);
        assert!(args.infer_types);
        assert!(args.show_comments);
        assert_eq!(args.store_suffix.as_deref(), Some("Repo"));
        assert_eq!(args.output, OutputFormat::Json);
        assert_eq!(args.out.as_ref().map(|p| p.as_str()), Some("out.ts"));
    }

    #[test]
    fn test_store_flags_conflict() {
        let result = Args::try_parse_from([
            "vue-class-migrate",
            "--store-suffix",
            "Repo",
            "--no-store-binding",
        ]);
        assert!(result.is_err());
    }
}
