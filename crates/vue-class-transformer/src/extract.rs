//! Single-pass entity extraction.

use crate::classify::{classify_call, classify_member, classify_method, classify_property};
use crate::error::TransformError;
use crate::types::{Entities, Entity};
use swc_common::comments::{Comment, Comments, SingleThreadedComments};
use swc_common::{BytePos, Spanned};
use swc_ecma_ast::*;
use swc_ecma_visit::{Visit, VisitWith};

/// Walks a module in source order and files every classified node.
pub struct Extractor<'a> {
    comments: &'a SingleThreadedComments,
    entities: Entities,
    /// The first fatal classification error; extraction stops once set.
    error: Option<TransformError>,
}

impl<'a> Extractor<'a> {
    pub fn new(comments: &'a SingleThreadedComments) -> Self {
        Self {
            comments,
            entities: Entities::default(),
            error: None,
        }
    }

    /// Extracts all entities from a module.
    pub fn extract(mut self, module: &Module) -> Result<Entities, TransformError> {
        module.visit_with(&mut self);
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.entities),
        }
    }

    fn failed(&self) -> bool {
        self.error.is_some()
    }

    fn file(&mut self, entity: Option<Entity>) {
        if let Some(entity) = entity {
            self.entities.push(entity);
        }
    }

    /// Comments written directly above a class member.
    ///
    /// They are keyed by the first token of the member, which is the first
    /// decorator when there is one.
    fn leading_comments(&self, positions: &[BytePos]) -> Vec<Comment> {
        positions
            .iter()
            .find_map(|pos| self.comments.get_leading(*pos))
            .unwrap_or_default()
    }
}

impl Visit for Extractor<'_> {
    fn visit_class_prop(&mut self, prop: &ClassProp) {
        if self.failed() {
            return;
        }

        let mut positions = Vec::with_capacity(3);
        if let Some(decorator) = prop.decorators.first() {
            positions.push(decorator.span.lo);
        }
        positions.push(prop.span.lo);
        positions.push(prop.key.span().lo);
        let comments = self.leading_comments(&positions);

        match classify_property(prop, comments) {
            Ok(entity) => self.file(entity),
            Err(err) => {
                self.error = Some(err);
                return;
            }
        }

        prop.visit_children_with(self);
    }

    fn visit_class_method(&mut self, method: &ClassMethod) {
        if self.failed() {
            return;
        }

        let comments = self.leading_comments(&[method.span.lo, method.key.span().lo]);
        let entity = classify_method(method, comments);
        self.file(entity);

        method.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, call: &CallExpr) {
        if self.failed() {
            return;
        }

        let entity = classify_call(call);
        self.file(entity);

        call.visit_children_with(self);
    }

    fn visit_member_expr(&mut self, member: &MemberExpr) {
        if self.failed() {
            return;
        }

        let entity = classify_member(member);
        self.file(entity);

        member.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse_module;
    use crate::error::SyntaxStage;
    use crate::types::ReactiveKind;
    use swc_common::comments::CommentKind;
    use swc_common::sync::Lrc;
    use swc_common::SourceMap;

    fn extract_source(source: &str) -> Result<Entities, TransformError> {
        let cm: Lrc<SourceMap> = Default::default();
        let parsed = parse_module(&cm, "test.ts", source, SyntaxStage::Source)?;
        Extractor::new(&parsed.comments).extract(&parsed.module)
    }

    #[test]
    fn test_counter_component() {
        let entities = extract_source(
            r#"export default class Counter extends Vue {
    count = 0

    increment() {
        this.count++
    }

    decrement() {
        this.count--
    }
}"#,
        )
        .unwrap();

        assert_eq!(entities.reactives.len(), 1);
        assert_eq!(entities.reactives[0].identifier, "count");
        assert_eq!(entities.reactives[0].kind, ReactiveKind::Ref);
        let names: Vec<_> = entities.functions.iter().map(|f| f.identifier.as_str()).collect();
        assert_eq!(names, vec!["increment", "decrement"]);
        assert!(entities.props.is_empty());
        assert!(entities.computeds.is_empty());
    }

    #[test]
    fn test_source_order_within_kind() {
        let entities = extract_source(
            r#"class A {
    c = 3
    @Prop() z!: string
    a = 1
    @Prop() y!: number
    b = { x: 1 }
    get second() { return 2 }
    get first() { return 1 }
}"#,
        )
        .unwrap();

        let reactives: Vec<_> = entities.reactives.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(reactives, vec!["c", "a", "b"]);
        let props: Vec<_> = entities.props.iter().map(|p| p.identifier.as_str()).collect();
        assert_eq!(props, vec!["z", "y"]);
        let computeds: Vec<_> = entities.computeds.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(computeds, vec!["second", "first"]);
        assert_eq!(entities.reactives[2].kind, ReactiveKind::Reactive);
    }

    #[test]
    fn test_emits_inside_methods() {
        let entities = extract_source(
            r#"class A {
    save() {
        this.$emit('save')
        this.$emit('save', 1)
        emit('close', 'now')
    }
}"#,
        )
        .unwrap();

        let names: Vec<_> = entities.emits.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(names, vec!["save", "close"]);
        assert!(entities.emits[0].payload.is_none());
        assert!(entities.emits[1].payload.is_some());
    }

    #[test]
    fn test_router_usage_is_collected_once() {
        let entities = extract_source(
            r#"class A {
    go() {
        this.$router.push('/a')
        this.$router.back()
    }
}"#,
        )
        .unwrap();
        assert_eq!(entities.composables.len(), 1);
        let composable = entities.composables.iter().next().unwrap();
        assert_eq!(composable.identifier, "router");
    }

    #[test]
    fn test_comments_are_attached() {
        let entities = extract_source(
            r#"class A {
    /** The title */
    @Prop() title!: string

    // counter
    count = 0
}"#,
        )
        .unwrap();

        assert_eq!(entities.props[0].comments.len(), 1);
        assert_eq!(entities.props[0].comments[0].kind, CommentKind::Block);
        assert_eq!(entities.reactives[0].comments.len(), 1);
        assert_eq!(entities.reactives[0].comments[0].kind, CommentKind::Line);
        assert_eq!(&*entities.reactives[0].comments[0].text, " counter");
    }

    #[test]
    fn test_decorator_error_propagates() {
        let err = extract_source("class A { @Prop(String, {}) a!: string }").unwrap_err();
        assert_eq!(err, TransformError::too_many_decorator_arguments());
    }

    #[test]
    fn test_empty_source() {
        assert!(extract_source("").unwrap().is_empty());
    }
}
