//! vue-class-migrate: Vue class component to `<script setup>` migration.

mod cli;
mod config;
mod output;

use clap::Parser;
use cli::Args;
use miette::{IntoDiagnostic, Result, WrapErr};
use output::{Printer, Target};
use std::fs;
use std::io::{self, Read, Write};
use vue_class_transformer::{transform, TransformOutcome};

fn main() -> Result<()> {
    let args = Args::parse();

    let options = config::resolve_options(&args).into_diagnostic()?;
    let source = read_input(&args)?;

    let outcome = TransformOutcome::from(transform(&source, &options));
    let (text, target) = Printer::new(args.output).render(&outcome, args.input_name());

    match (target, &args.out) {
        (Target::Result, Some(path)) => fs::write(path, &text)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write {path}"))?,
        (Target::Result, None) => io::stdout().write_all(text.as_bytes()).into_diagnostic()?,
        (Target::Diagnostic, _) => eprint!("{text}"),
    }

    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn read_input(args: &Args) -> Result<String> {
    match args.input_path() {
        Some(path) => fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read {path}")),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .into_diagnostic()
                .wrap_err("failed to read stdin")?;
            Ok(source)
        }
    }
}
