//! Classification of class members, calls and `this` accesses.
//!
//! Each function inspects exactly one node and returns the entity it
//! represents, `None` when the node is not interesting, or an error when a
//! decorator is malformed.

use crate::error::TransformError;
use crate::types::{
    Composable, Computed, Emit, Entity, Method, Prop, Reactive, ReactiveKind, Validator,
};
use smol_str::SmolStr;
use swc_common::comments::Comment;
use swc_ecma_ast::*;

/// Class hooks and the setup hooks that replace them.
pub const LIFECYCLE_HOOKS: &[(&str, &str)] = &[
    ("beforeCreate", "onBeforeMount"),
    ("created", "onBeforeMount"),
    ("beforeMount", "onBeforeMount"),
    ("mounted", "onMounted"),
    ("beforeDestroy", "onBeforeUnmount"),
    ("destroyed", "onUnmounted"),
    ("activated", "onActivated"),
    ("deactivated", "onDeactivated"),
];

/// Instance members that become composable calls: `(member, binding, function)`.
pub const COMPOSABLES: &[(&str, &str, &str)] = &[
    ("$router", "router", "useRouter"),
    ("$route", "route", "useRoute"),
];

/// Decorators that mark a field as a prop.
const PROP_DECORATORS: &[&str] = &["Prop"];

/// Names under which a component raises events.
const EMIT_MEMBER: &str = "$emit";
const EMIT_FUNCTION: &str = "emit";

/// Returns the setup hook for a class lifecycle method name.
pub fn lifecycle_hook(name: &str) -> Option<&'static str> {
    LIFECYCLE_HOOKS
        .iter()
        .find(|(class_hook, _)| *class_hook == name)
        .map(|(_, setup_hook)| *setup_hook)
}

/// Best-effort type of a literal value. Anything outside the table is
/// untyped.
pub fn literal_type(expr: &Expr) -> Option<&'static str> {
    match expr {
        Expr::Lit(Lit::Str(_)) => Some("string"),
        Expr::Lit(Lit::Num(_)) => Some("number"),
        Expr::Lit(Lit::Bool(_)) => Some("boolean"),
        Expr::Object(_) => Some("object"),
        Expr::Array(_) => Some("Array"),
        Expr::Fn(_) | Expr::Arrow(_) => Some("Function"),
        Expr::Paren(paren) => literal_type(&paren.expr),
        _ => None,
    }
}

/// Whether a declared type may be dropped and left to inference.
///
/// An absent annotation trivially qualifies; otherwise only keyword types
/// (`string`, `number`, `void`, ...), `this` and literal types do.
pub fn can_infer_type(type_ann: Option<&TsTypeAnn>) -> bool {
    match type_ann {
        None => true,
        Some(ann) => matches!(
            &*ann.type_ann,
            TsType::TsKeywordType(_) | TsType::TsThisType(_) | TsType::TsLitType(_)
        ),
    }
}

/// Whether `name` follows the store naming convention.
pub fn is_store_name(name: &str, suffix: Option<&str>) -> bool {
    match suffix {
        Some(suffix) if !suffix.is_empty() => name.ends_with(suffix),
        _ => false,
    }
}

/// The configuration argument of a `@Prop(...)` decorator.
enum PropConfig<'a> {
    /// `@Prop()` or an argument of an unsupported shape.
    None,
    /// `@Prop([String, Number])`
    Types,
    /// `@Prop(String)`
    Type,
    /// `@Prop({ default: ..., validator: ... })`
    Options(&'a ObjectLit),
}

/// Finds the prop decorator of a field, if any, and extracts its
/// configuration.
fn prop_config(decorators: &[Decorator]) -> Result<Option<PropConfig<'_>>, TransformError> {
    for decorator in decorators {
        match &*decorator.expr {
            Expr::Ident(ident) if is_prop_decorator(&ident.sym) => {
                return Ok(Some(PropConfig::None));
            }
            Expr::Call(call) => {
                let Callee::Expr(callee) = &call.callee else {
                    continue;
                };
                let Expr::Ident(ident) = &**callee else {
                    continue;
                };
                if !is_prop_decorator(&ident.sym) {
                    continue;
                }
                if call.args.len() > 1 {
                    return Err(TransformError::too_many_decorator_arguments());
                }
                let config = match call.args.first() {
                    Some(ExprOrSpread { spread: None, expr }) => match &**expr {
                        Expr::Array(_) => PropConfig::Types,
                        Expr::Ident(_) => PropConfig::Type,
                        Expr::Object(object) => PropConfig::Options(object),
                        _ => PropConfig::None,
                    },
                    _ => PropConfig::None,
                };
                return Ok(Some(config));
            }
            _ => {}
        }
    }
    Ok(None)
}

fn is_prop_decorator(name: &str) -> bool {
    PROP_DECORATORS.contains(&name)
}

fn prop_name(key: &PropName) -> Option<SmolStr> {
    match key {
        PropName::Ident(ident) => Some(SmolStr::new(&*ident.sym)),
        _ => None,
    }
}

/// Classifies a class field as a prop or as reactive state.
pub fn classify_property(
    prop: &ClassProp,
    comments: Vec<Comment>,
) -> Result<Option<Entity>, TransformError> {
    let config = prop_config(&prop.decorators)?;
    let Some(identifier) = prop_name(&prop.key) else {
        return Ok(None);
    };

    let Some(config) = config else {
        return Ok(Some(Entity::Reactive(Reactive {
            identifier,
            kind: ReactiveKind::from_initializer(prop.value.as_deref()),
            type_ann: prop.type_ann.clone(),
            value: prop.value.clone(),
            comments,
        })));
    };

    let mut default_value = None;
    let mut validator = None;
    if let PropConfig::Options(options) = config {
        for entry in &options.props {
            let PropOrSpread::Prop(entry) = entry else {
                continue;
            };
            match &**entry {
                swc_ecma_ast::Prop::KeyValue(KeyValueProp { key, value }) => {
                    match prop_name(key).as_deref() {
                        Some("default") => default_value = Some(value.clone()),
                        Some("validator") if matches!(&**value, Expr::Fn(_) | Expr::Arrow(_)) => {
                            validator = Some(Validator::Expr(value.clone()));
                        }
                        _ => {}
                    }
                }
                swc_ecma_ast::Prop::Method(MethodProp { key, function }) => {
                    if prop_name(key).as_deref() == Some("validator") {
                        validator = Some(Validator::Method(function.clone()));
                    }
                }
                _ => {}
            }
        }
    }

    Ok(Some(Entity::Prop(Prop {
        identifier,
        type_ann: prop.type_ann.clone(),
        default_value,
        validator,
        comments,
    })))
}

/// Classifies a class method as a computed value (getter) or a function.
pub fn classify_method(method: &ClassMethod, comments: Vec<Comment>) -> Option<Entity> {
    let identifier = prop_name(&method.key)?;
    match method.kind {
        MethodKind::Getter => Some(Entity::Computed(Computed {
            identifier,
            function: method.function.clone(),
            comments,
        })),
        MethodKind::Method => Some(Entity::Function(Method {
            lifecycle_hook: lifecycle_hook(&identifier),
            identifier,
            function: method.function.clone(),
            comments,
        })),
        MethodKind::Setter => None,
    }
}

/// Classifies `this.$emit('event', payload)` and `emit('event', payload)`.
pub fn classify_call(call: &CallExpr) -> Option<Entity> {
    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    let is_emit = match &**callee {
        Expr::Member(member) => this_member_name(member) == Some(EMIT_MEMBER),
        Expr::Ident(ident) => &*ident.sym == EMIT_FUNCTION,
        _ => false,
    };
    if !is_emit {
        return None;
    }

    let event = call.args.first()?;
    let Expr::Lit(Lit::Str(name)) = &*event.expr else {
        return None;
    };

    Some(Entity::Emit(Emit {
        identifier: SmolStr::new(name.value.to_string_lossy()),
        payload: call.args.get(1).map(|arg| arg.expr.clone()),
    }))
}

/// Classifies `this.$router` style accesses as composable usages.
pub fn classify_member(member: &MemberExpr) -> Option<Entity> {
    let name = this_member_name(member)?;
    COMPOSABLES
        .iter()
        .find(|(member, _, _)| *member == name)
        .map(|(_, identifier, func_name)| {
            Entity::Composable(Composable {
                identifier: SmolStr::new(identifier),
                func_name: SmolStr::new(func_name),
            })
        })
}

/// The member name of `this.name`, or `None` for any other member access.
pub fn this_member_name(member: &MemberExpr) -> Option<&str> {
    match (&*member.obj, &member.prop) {
        (Expr::This(_), MemberProp::Ident(prop)) => Some(&*prop.sym),
        _ => None,
    }
}
