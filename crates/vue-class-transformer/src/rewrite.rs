//! Rewriting of `this` accesses in the synthesized module.
//!
//! Two passes run over the re-parsed setup script:
//!
//! 1. [`ThisRewriter`] turns every `this.name` into the setup-style reference:
//!    `name(...)` for calls, `nameStore.x` for store handles, bare `name` for
//!    `reactive` state and composables, and `name.value` for everything else.
//! 2. [`MarkerStripper`] drops the leading `$` of instance API names
//!    (`$emit` → `emit`, `$router` → `router`).
//!
//! Both passes only consult [`RewriteNames`], which is computed before either
//! runs. Name lookups ignore the `$` marker, so the passes commute.

use crate::classify::{is_store_name, this_member_name};
use crate::transform::TransformOptions;
use crate::types::{Entities, ReactiveKind};
use rustc_hash::FxHashSet;
use swc_common::{Span, DUMMY_SP};
use swc_ecma_ast::*;
use swc_ecma_visit::{VisitMut, VisitMutWith};

const MARKER: char = '$';

/// Name sets the rewrite passes decide on.
#[derive(Debug, Clone, Default)]
pub struct RewriteNames {
    /// Names read without `.value`: `reactive` state and composables.
    bare: FxHashSet<String>,
    store_suffix: Option<String>,
}

impl RewriteNames {
    pub fn new(
        bare: impl IntoIterator<Item = impl AsRef<str>>,
        store_suffix: Option<String>,
    ) -> Self {
        Self {
            bare: bare
                .into_iter()
                .map(|name| unmarked(name.as_ref()).to_string())
                .collect(),
            store_suffix,
        }
    }

    pub fn from_entities(entities: &Entities, options: &TransformOptions) -> Self {
        let reactives = entities
            .reactives
            .iter()
            .filter(|r| r.kind == ReactiveKind::Reactive)
            .map(|r| r.identifier.as_str());
        let composables = entities.composables.iter().map(|c| c.identifier.as_str());
        Self::new(reactives.chain(composables), options.store_suffix.clone())
    }

    fn is_bare(&self, name: &str) -> bool {
        self.bare.contains(unmarked(name))
    }

    fn is_store(&self, name: &str) -> bool {
        is_store_name(unmarked(name), self.store_suffix.as_deref())
    }
}

/// Runs both passes over a module.
pub fn rewrite_module(module: &mut Module, names: &RewriteNames) {
    module.visit_mut_with(&mut ThisRewriter::new(names));
    module.visit_mut_with(&mut MarkerStripper);
}

/// `name` without its leading marker, unless the marker is all there is.
fn unmarked(name: &str) -> &str {
    match name.strip_prefix(MARKER) {
        Some(rest) if !rest.is_empty() => rest,
        _ => name,
    }
}

fn ident(name: &str, span: Span) -> Ident {
    Ident::new_no_ctxt(name.into(), span)
}

/// `this.name` → `name(...)`, `name.value` or `name`.
pub struct ThisRewriter<'a> {
    names: &'a RewriteNames,
}

impl<'a> ThisRewriter<'a> {
    pub fn new(names: &'a RewriteNames) -> Self {
        Self { names }
    }

    /// The reference that replaces `this.name` outside callee position.
    fn reference(&self, name: &str, span: Span) -> Expr {
        if self.names.is_bare(name) {
            Expr::Ident(ident(name, span))
        } else {
            Expr::Member(value_member(name, span))
        }
    }
}

fn value_member(name: &str, span: Span) -> MemberExpr {
    MemberExpr {
        span,
        obj: Box::new(Expr::Ident(ident(name, span))),
        prop: MemberProp::Ident(IdentName::new("value".into(), DUMMY_SP)),
    }
}

/// Owned name and span of a `this.name` access.
fn this_access(member: &MemberExpr) -> Option<(String, Span)> {
    this_member_name(member).map(|name| (name.to_string(), member.span))
}

impl VisitMut for ThisRewriter<'_> {
    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        if let Callee::Expr(callee) = &mut call.callee {
            let access = match &**callee {
                Expr::Member(member) => this_access(member),
                _ => None,
            };
            if let Some((name, span)) = access {
                **callee = Expr::Ident(ident(&name, span));
            }
        }

        call.visit_mut_children_with(self);
    }

    fn visit_mut_member_expr(&mut self, member: &mut MemberExpr) {
        // this.userStore.items → userStore.items
        let store = match &*member.obj {
            Expr::Member(inner) => this_access(inner).filter(|(name, _)| self.names.is_store(name)),
            _ => None,
        };
        if let Some((name, span)) = store {
            member.obj = Box::new(Expr::Ident(ident(&name, span)));
        }

        member.visit_mut_children_with(self);
    }

    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        let access = match &*expr {
            Expr::Member(member) => this_access(member),
            _ => None,
        };
        if let Some((name, span)) = access {
            *expr = self.reference(&name, span);
            return;
        }

        expr.visit_mut_children_with(self);
    }

    fn visit_mut_simple_assign_target(&mut self, target: &mut SimpleAssignTarget) {
        let access = match &*target {
            SimpleAssignTarget::Member(member) => this_access(member),
            _ => None,
        };
        if let Some((name, span)) = access {
            *target = if self.names.is_bare(&name) {
                SimpleAssignTarget::Ident(BindingIdent::from(ident(&name, span)))
            } else {
                SimpleAssignTarget::Member(value_member(&name, span))
            };
            return;
        }

        target.visit_mut_children_with(self);
    }
}

/// Strips one leading `$` from every identifier and property name.
pub struct MarkerStripper;

impl VisitMut for MarkerStripper {
    fn visit_mut_ident(&mut self, ident: &mut Ident) {
        let stripped = strip_marker(&ident.sym);
        if let Some(name) = stripped {
            ident.sym = name.into();
        }
    }

    fn visit_mut_ident_name(&mut self, ident: &mut IdentName) {
        let stripped = strip_marker(&ident.sym);
        if let Some(name) = stripped {
            ident.sym = name.into();
        }
    }
}

fn strip_marker(name: &str) -> Option<String> {
    match name.strip_prefix(MARKER) {
        Some(rest) if !rest.is_empty() => Some(rest.to_string()),
        _ => None,
    }
}
