//! Thin wrapper over swc: text → module, node → text.
//!
//! Every transform owns one [`SourceMap`]; both the user's source and the
//! synthesized intermediate text are registered as files in it, so node spans
//! from either can be printed with the same map.

use crate::error::{SyntaxStage, TransformError};
use swc_common::comments::{Comments, SingleThreadedComments};
use swc_common::sync::Lrc;
use swc_common::{FileName, SourceMap, Spanned};
use swc_ecma_ast::Module;
use swc_ecma_codegen::Node;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// A parsed module together with the comments collected while parsing it.
pub struct ParsedModule {
    pub module: Module,
    pub comments: SingleThreadedComments,
}

/// The syntax accepted for class components: TypeScript with legacy
/// decorators, no JSX.
fn syntax() -> Syntax {
    Syntax::Typescript(TsSyntax {
        tsx: false,
        decorators: true,
        ..Default::default()
    })
}

/// Parses `text` as a TypeScript module.
///
/// Recoverable parser errors are treated as fatal: the first one is reported.
pub fn parse_module(
    cm: &Lrc<SourceMap>,
    file_name: &str,
    text: &str,
    stage: SyntaxStage,
) -> Result<ParsedModule, TransformError> {
    let fm = cm.new_source_file(
        Lrc::new(FileName::Custom(file_name.to_string())),
        text.to_string(),
    );
    let comments = SingleThreadedComments::default();

    let mut parser = Parser::new(syntax(), StringInput::from(&*fm), Some(&comments));
    let result = parser.parse_module();
    let recovered = parser.take_errors();

    let module = result.map_err(|err| syntax_error(cm, &err, stage))?;
    if let Some(err) = recovered.first() {
        return Err(syntax_error(cm, err, stage));
    }

    Ok(ParsedModule { module, comments })
}

fn syntax_error(
    cm: &SourceMap,
    err: &swc_ecma_parser::error::Error,
    stage: SyntaxStage,
) -> TransformError {
    let loc = cm.lookup_char_pos(err.span().lo);
    TransformError::Syntax {
        stage,
        line: loc.line,
        column: loc.col_display + 1,
        message: err.kind().msg().into_owned(),
    }
}

/// Prints a node without comments.
pub fn generate<N: Node>(cm: &Lrc<SourceMap>, node: &N) -> String {
    swc_ecma_codegen::to_code_default(cm.clone(), None, node)
}

/// Prints a whole module, emitting the comments attached to it.
///
/// The printer takes comments out of the store as it emits them, so a store
/// can be printed at most once.
pub fn emit_module(cm: &Lrc<SourceMap>, parsed: &ParsedModule) -> String {
    let comments: &dyn Comments = &parsed.comments;
    swc_ecma_codegen::to_code_default(cm.clone(), Some(comments), &parsed.module)
}
