//! Rendering of extracted entities as `<script setup>` source text.
//!
//! Sections are emitted in a fixed order: props, emits, composables,
//! reactive state, functions, computed values. The text produced here still
//! contains `this.` accesses; [`crate::rewrite`] resolves them after the text
//! has been parsed again.

use crate::ast::generate;
use crate::classify::{can_infer_type, is_store_name, literal_type};
use crate::transform::TransformOptions;
use crate::types::{Composable, Computed, Emit, Entities, Method, Prop, Reactive};
use swc_common::comments::{Comment, CommentKind};
use swc_common::sync::Lrc;
use swc_common::{SourceMap, DUMMY_SP};
use swc_ecma_ast::*;

/// Renders entity collections into source text.
pub struct Synthesizer<'a> {
    cm: &'a Lrc<SourceMap>,
    options: &'a TransformOptions,
}

impl<'a> Synthesizer<'a> {
    pub fn new(cm: &'a Lrc<SourceMap>, options: &'a TransformOptions) -> Self {
        Self { cm, options }
    }

    /// Renders every section and joins the non-empty ones.
    pub fn synthesize(&self, entities: &Entities) -> String {
        let sections = [
            self.props_section(&entities.props),
            self.emits_section(&entities.emits),
            join_lines(entities.composables.iter().map(composable_line)),
            join_lines(entities.reactives.iter().map(|r| self.reactive_line(r))),
            join_lines(entities.functions.iter().map(|f| self.function_code(f))),
            join_lines(entities.computeds.iter().map(|c| self.computed_line(c))),
        ];

        let mut output = String::new();
        for section in sections.iter().filter(|s| !s.is_empty()) {
            if !output.is_empty() {
                output.push_str("\n\n");
            }
            output.push_str(section);
        }
        output
    }

    fn comments(&self, comments: &[Comment]) -> String {
        if self.options.show_comments {
            render_comments(comments)
        } else {
            String::new()
        }
    }

    /// Whether a declared type should be left out in favour of inference.
    fn infers(&self, type_ann: Option<&TsTypeAnn>) -> bool {
        self.options.infer_types && can_infer_type(type_ann)
    }

    fn type_arg(&self, ann: &TsTypeAnn) -> String {
        format!("<{}>", generate(self.cm, &*ann.type_ann))
    }

    /// The type written for a prop in the `defineProps` type literal.
    fn prop_type(&self, prop: &Prop) -> String {
        let inferred = prop.default_value.as_deref().and_then(literal_type);
        match (prop.type_ann.as_deref(), inferred) {
            (Some(ann), Some(inferred)) if self.infers(Some(ann)) => inferred.to_string(),
            (Some(ann), _) => generate(self.cm, &*ann.type_ann),
            (None, Some(inferred)) => inferred.to_string(),
            (None, None) => "any".to_string(),
        }
    }

    fn props_section(&self, props: &[Prop]) -> String {
        if props.is_empty() {
            return String::new();
        }

        let mut define = String::from("defineProps<{\n");
        for prop in props {
            define.push_str(&self.comments(&prop.comments));
            let optional = if prop.default_value.is_some() { "?" } else { "" };
            define.push_str(&format!(
                "{}{}: {};\n",
                prop.identifier,
                optional,
                self.prop_type(prop)
            ));
        }
        define.push_str("}>()");

        let defaults: Vec<String> = props
            .iter()
            .filter_map(|prop| {
                let value = prop.default_value.as_deref()?;
                Some(format!("{}: {}", prop.identifier, generate(self.cm, value)))
            })
            .collect();

        let props_value = if defaults.is_empty() {
            define
        } else {
            format!("withDefaults({}, {{\n{}\n}})", define, defaults.join(",\n"))
        };

        let names: Vec<&str> = props.iter().map(|p| p.identifier.as_str()).collect();
        format!(
            "const props = {};\nconst {{ {} }} = toRefs(props);",
            props_value,
            names.join(", ")
        )
    }

    fn emits_section(&self, emits: &[Emit]) -> String {
        if emits.is_empty() {
            return String::new();
        }

        let signatures: Vec<String> = emits
            .iter()
            .map(|emit| {
                let event = quote(&emit.identifier);
                match emit.payload.as_deref().and_then(literal_type) {
                    Some(payload) => format!("(event: {event}, value: {payload}): void;"),
                    None => format!("(event: {event}): void;"),
                }
            })
            .collect();
        format!("const emit = defineEmits<{{\n{}\n}}>();", signatures.join("\n"))
    }

    fn reactive_line(&self, reactive: &Reactive) -> String {
        let comments = self.comments(&reactive.comments);

        if let Some(value) = reactive.value.as_deref() {
            if self.is_store_call(value) {
                return format!(
                    "{}const {} = {};",
                    comments,
                    reactive.identifier,
                    generate(self.cm, value)
                );
            }
        }

        let type_arg = match reactive.type_ann.as_deref() {
            Some(ann) if !self.infers(Some(ann)) => self.type_arg(ann),
            _ => String::new(),
        };
        let value = reactive
            .value
            .as_deref()
            .map(|value| generate(self.cm, value))
            .unwrap_or_default();

        format!(
            "{}const {} = {}{}({});",
            comments,
            reactive.identifier,
            reactive.kind.wrapper(),
            type_arg,
            value
        )
    }

    /// `useUserStore()` style initializers are bound as-is.
    fn is_store_call(&self, value: &Expr) -> bool {
        let Expr::Call(call) = value else {
            return false;
        };
        let Callee::Expr(callee) = &call.callee else {
            return false;
        };
        match &**callee {
            Expr::Ident(ident) => is_store_name(&ident.sym, self.options.store_suffix.as_deref()),
            _ => false,
        }
    }

    fn function_code(&self, method: &Method) -> String {
        let comments = self.comments(&method.comments);

        let mut function = method.function.clone();
        if self.infers(function.return_type.as_deref()) {
            function.return_type = None;
        }
        for param in &mut function.params {
            param.decorators.clear();
        }

        let code = match method.lifecycle_hook {
            Some(hook) => {
                let call = CallExpr {
                    span: DUMMY_SP,
                    ctxt: Default::default(),
                    callee: Callee::Expr(Box::new(Expr::Ident(ident(hook)))),
                    args: vec![ExprOrSpread {
                        spread: None,
                        expr: Box::new(Expr::Arrow(into_arrow(*function))),
                    }],
                    type_args: None,
                };
                let stmt = Stmt::Expr(ExprStmt {
                    span: DUMMY_SP,
                    expr: Box::new(Expr::Call(call)),
                });
                generate(self.cm, &stmt)
            }
            None => {
                let decl = Decl::Fn(FnDecl {
                    ident: ident(&method.identifier),
                    declare: false,
                    function,
                });
                generate(self.cm, &decl)
            }
        };

        format!("{}{}", comments, code.trim_end())
    }

    fn computed_line(&self, computed: &Computed) -> String {
        let comments = self.comments(&computed.comments);

        let type_arg = match computed.type_ann() {
            Some(ann) if !self.infers(Some(ann)) => self.type_arg(ann),
            _ => String::new(),
        };

        let mut function = (*computed.function).clone();
        function.return_type = None;
        let getter = Expr::Arrow(into_arrow(function));

        format!(
            "{}const {} = computed{}({});",
            comments,
            computed.identifier,
            type_arg,
            generate(self.cm, &getter)
        )
    }
}

fn composable_line(composable: &Composable) -> String {
    format!(
        "const {} = {}();",
        composable.identifier, composable.func_name
    )
}

fn join_lines(lines: impl Iterator<Item = String>) -> String {
    lines.collect::<Vec<_>>().join("\n")
}

fn ident(name: &str) -> Ident {
    Ident::new_no_ctxt(name.into(), DUMMY_SP)
}

/// Converts a method body into an arrow function with the same signature.
fn into_arrow(function: Function) -> ArrowExpr {
    let body = function.body.unwrap_or(BlockStmt {
        span: DUMMY_SP,
        ctxt: Default::default(),
        stmts: Vec::new(),
    });

    ArrowExpr {
        span: DUMMY_SP,
        ctxt: Default::default(),
        params: function.params.into_iter().map(|param| param.pat).collect(),
        body: Box::new(BlockStmtOrExpr::BlockStmt(body)),
        is_async: function.is_async,
        is_generator: false,
        type_params: function.type_params,
        return_type: function.return_type,
    }
}

/// Renders comments with their original punctuation, one per line.
fn render_comments(comments: &[Comment]) -> String {
    comments
        .iter()
        .map(|comment| match comment.kind {
            CommentKind::Block => format!("/*{}*/\n", comment.text),
            CommentKind::Line => format!("//{}\n", comment.text),
        })
        .collect()
}

/// Single-quoted string literal for an event name.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}
