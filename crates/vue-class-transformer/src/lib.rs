//! Vue class component to `<script setup>` transformation.
//!
//! This crate rewrites a TypeScript class component written with
//! `vue-property-decorator` conventions into the body of a `<script setup>`
//! block. It handles:
//! - `@Prop` fields, turned into `defineProps` (with `withDefaults`) and `toRefs`
//! - `$emit` calls, collected into a typed `defineEmits` declaration
//! - plain fields, turned into `ref` or `reactive` state
//! - getters, turned into `computed` values
//! - methods, turned into functions or lifecycle hook registrations
//! - `this.` accesses, rewritten to the matching local binding
//!
//! # Example
//!
//! ```
//! use vue_class_transformer::{transform, TransformOptions};
//!
//! let source = r#"
//! export default class Counter extends Vue {
//!     count = 0
//!
//!     increment() {
//!         this.count++
//!     }
//! }
//! "#;
//!
//! let output = transform(source, &TransformOptions::default()).unwrap();
//! assert!(output.code.contains("const count = ref(0);"));
//! assert!(output.code.contains("count.value++"));
//! ```

mod ast;
mod classify;
mod error;
mod extract;
mod format;
mod rewrite;
mod synth;
mod transform;
mod types;

pub use classify::{lifecycle_hook, literal_type, COMPOSABLES, LIFECYCLE_HOOKS};
pub use error::{SyntaxStage, TransformError};
pub use format::{Formatter, SwcFormatter};
pub use transform::{
    extract, transform, TransformOptions, TransformOutcome, TransformOutput, Transpiler,
};
pub use types::{
    Composable, Computed, Emit, Entities, Entity, EntityKind, Method, Prop, Reactive,
    ReactiveKind, Validator,
};
