//! Entities extracted from a class component.

use indexmap::IndexSet;
use smol_str::SmolStr;
use swc_common::comments::Comment;
use swc_ecma_ast::{Expr, Function, TsTypeAnn};

/// The tag of an extracted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Prop,
    Emit,
    Composable,
    Reactive,
    Function,
    Computed,
}

/// How a piece of reactive state is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactiveKind {
    /// `ref(...)`, read through `.value`.
    Ref,
    /// `reactive(...)`, read directly. Chosen for object-literal initializers.
    Reactive,
}

impl ReactiveKind {
    /// Decides the wrapper from the shape of an initializer.
    pub fn from_initializer(init: Option<&Expr>) -> Self {
        match init {
            Some(Expr::Object(_)) => Self::Reactive,
            _ => Self::Ref,
        }
    }

    /// The name of the wrapping function.
    pub fn wrapper(self) -> &'static str {
        match self {
            Self::Ref => "ref",
            Self::Reactive => "reactive",
        }
    }
}

/// A `@Prop` field: a value supplied by the component's parent.
#[derive(Debug, Clone)]
pub struct Prop {
    pub identifier: SmolStr,
    pub type_ann: Option<Box<TsTypeAnn>>,
    pub default_value: Option<Box<Expr>>,
    /// The prop's `validator` function, if configured.
    pub validator: Option<Validator>,
    pub comments: Vec<Comment>,
}

/// The `validator` entry of a prop configuration object.
#[derive(Debug, Clone)]
pub enum Validator {
    /// `validator: function (v) {}` or `validator: (v) => ...`
    Expr(Box<Expr>),
    /// `validator(v) {}`
    Method(Box<Function>),
}

/// A plain class field.
#[derive(Debug, Clone)]
pub struct Reactive {
    pub identifier: SmolStr,
    pub kind: ReactiveKind,
    pub type_ann: Option<Box<TsTypeAnn>>,
    pub value: Option<Box<Expr>>,
    pub comments: Vec<Comment>,
}

/// A getter.
#[derive(Debug, Clone)]
pub struct Computed {
    pub identifier: SmolStr,
    pub function: Box<Function>,
    pub comments: Vec<Comment>,
}

impl Computed {
    /// The getter's declared return type.
    pub fn type_ann(&self) -> Option<&TsTypeAnn> {
        self.function.return_type.as_deref()
    }
}

/// A plain method.
#[derive(Debug, Clone)]
pub struct Method {
    pub identifier: SmolStr,
    pub function: Box<Function>,
    /// The setup hook this method maps to, when it is a lifecycle method.
    pub lifecycle_hook: Option<&'static str>,
    pub comments: Vec<Comment>,
}

impl Method {
    pub fn is_lifecycle(&self) -> bool {
        self.lifecycle_hook.is_some()
    }
}

/// An event raised through `this.$emit(...)` or `emit(...)`.
#[derive(Debug, Clone)]
pub struct Emit {
    pub identifier: SmolStr,
    pub payload: Option<Box<Expr>>,
}

/// A local binding produced by a well-known composable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Composable {
    pub identifier: SmolStr,
    pub func_name: SmolStr,
}

/// One classified node.
#[derive(Debug, Clone)]
pub enum Entity {
    Prop(Prop),
    Emit(Emit),
    Composable(Composable),
    Reactive(Reactive),
    Function(Method),
    Computed(Computed),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Prop(_) => EntityKind::Prop,
            Self::Emit(_) => EntityKind::Emit,
            Self::Composable(_) => EntityKind::Composable,
            Self::Reactive(_) => EntityKind::Reactive,
            Self::Function(_) => EntityKind::Function,
            Self::Computed(_) => EntityKind::Computed,
        }
    }
}

/// Everything extracted from one component, grouped by kind.
///
/// Field order is the order sections are emitted in.
#[derive(Debug, Clone, Default)]
pub struct Entities {
    pub props: Vec<Prop>,
    pub emits: Vec<Emit>,
    pub composables: IndexSet<Composable>,
    pub reactives: Vec<Reactive>,
    pub functions: Vec<Method>,
    pub computeds: Vec<Computed>,
}

impl Entities {
    /// Files an entity into its container.
    ///
    /// Emits are deduplicated by event name, keeping the first; composables
    /// collapse when identical.
    pub fn push(&mut self, entity: Entity) {
        match entity {
            Entity::Prop(prop) => self.props.push(prop),
            Entity::Emit(emit) => {
                if !self.emits.iter().any(|e| e.identifier == emit.identifier) {
                    self.emits.push(emit);
                }
            }
            Entity::Composable(composable) => {
                self.composables.insert(composable);
            }
            Entity::Reactive(reactive) => self.reactives.push(reactive),
            Entity::Function(method) => self.functions.push(method),
            Entity::Computed(computed) => self.computeds.push(computed),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
            && self.emits.is_empty()
            && self.composables.is_empty()
            && self.reactives.is_empty()
            && self.functions.is_empty()
            && self.computeds.is_empty()
    }
}
