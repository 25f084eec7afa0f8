//! Configuration loading.

use crate::cli::Args;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use thiserror::Error;
use vue_class_transformer::TransformOptions;

/// A problem with the options file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
    #[error("invalid options in {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        source: serde_json::Error,
    },
}

/// Loads transform options from a JSON file.
///
/// Missing keys keep their defaults.
pub fn load_options(path: &Utf8Path) -> Result<TransformOptions, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Builds the effective options: the options file (or defaults) with the
/// command-line flags applied on top.
pub fn resolve_options(args: &Args) -> Result<TransformOptions, ConfigError> {
    let mut options = match &args.config {
        Some(path) => load_options(path)?,
        None => TransformOptions::default(),
    };

    if args.infer_types {
        options.infer_types = true;
    }
    if args.show_comments {
        options.show_comments = true;
    }
    if let Some(suffix) = &args.store_suffix {
        options.store_suffix = Some(suffix.clone());
    }
    if args.no_store_binding {
        options.store_suffix = None;
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn options_file(content: &str) -> (tempfile::NamedTempFile, Utf8PathBuf) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let path = Utf8PathBuf::from_path_buf(file.path().to_path_buf()).unwrap();
        (file, path)
    }

    #[test]
    fn test_defaults_without_config() {
        let args = Args::parse_from(["vue-class-migrate"]);
        assert_eq!(resolve_options(&args).unwrap(), TransformOptions::default());
    }

    #[test]
    fn test_load_options_file() {
        let (_file, path) = options_file(r#"{ "showComments": true, "storeSuffix": "Repo" }"#);
        let options = load_options(&path).unwrap();
        assert!(options.show_comments);
        assert!(!options.infer_types);
        assert_eq!(options.store_suffix.as_deref(), Some("Repo"));
    }

    #[test]
    fn test_flags_override_file() {
        let (_file, path) = options_file(r#"{ "storeSuffix": "Repo" }"#);
        let args = Args::parse_from([
            "vue-class-migrate",
            "--config",
            path.as_str(),
            "--infer-types",
            "--no-store-binding",
        ]);
        let options = resolve_options(&args).unwrap();
        assert!(options.infer_types);
        assert_eq!(options.store_suffix, None);
    }

    #[test]
    fn test_invalid_file() {
        let (_file, path) = options_file("{ not json");
        let err = load_options(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid options in "));
    }

    #[test]
    fn test_missing_file() {
        let err = load_options(Utf8Path::new("/nonexistent/options.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
