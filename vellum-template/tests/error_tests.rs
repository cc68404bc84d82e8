use vellum_core::{DataContext, ValueKind};
use vellum_template::{Component, Template, TemplateError};

fn render_err(template: &str, data: DataContext) -> TemplateError {
    let app = Component::new("App", template).with_data(data);
    Template::new(&app).render().expect_err("render should fail")
}

#[test]
fn absent_fields_name_the_field() {
    for template in [
        r#"<a v-bind:href="Link"></a>"#,
        r#"<div v-html="Link"></div>"#,
        r#"<input v-model="Link">"#,
    ] {
        assert_eq!(
            render_err(template, DataContext::new()),
            TemplateError::UnknownDataField("Link".into()),
            "{template}"
        );
    }
}

#[test]
fn html_and_model_require_strings() {
    let data = DataContext::new().with("Count", 1);
    let expected = TemplateError::TypeMismatch {
        field: "Count".into(),
        expected: ValueKind::String,
        found: ValueKind::Number,
    };
    assert_eq!(render_err(r#"<div v-html="Count"></div>"#, data.clone()), expected);
    assert_eq!(render_err(r#"<input v-model="Count">"#, data), expected);
}

#[test]
fn for_needs_a_sequence() {
    assert_eq!(
        render_err(r#"<li v-for="Item in Items"></li>"#, DataContext::new()),
        TemplateError::SequenceNotFound("Items".into())
    );
    assert_eq!(
        render_err(
            r#"<li v-for="Item in Items"></li>"#,
            DataContext::new().with("Items", "abc")
        ),
        TemplateError::NotSequence {
            field: "Items".into(),
            found: ValueKind::String,
        }
    );
}

#[test]
fn malformed_for_expression() {
    assert_eq!(
        render_err(
            r#"<li v-for="Item of Items"></li>"#,
            DataContext::new().with("Items", vec!["a"])
        ),
        TemplateError::MalformedForExpression("Item of Items".into())
    );
}

#[test]
fn unknown_directives_are_rejected() {
    assert_eq!(
        render_err(r#"<p v-once>x</p>"#, DataContext::new()),
        TemplateError::UnknownDirective("v-once".into())
    );
    assert_eq!(
        render_err(r#"<p v-on="Click">x</p>"#, DataContext::new()),
        TemplateError::UnknownDirective("v-on".into())
    );
}

#[test]
fn nested_errors_surface_from_deep_in_the_tree() {
    assert_eq!(
        render_err(
            r#"<div><section><p v-bind:id="Missing"></p></section></div>"#,
            DataContext::new()
        ),
        TemplateError::UnknownDataField("Missing".into())
    );
}

#[test]
fn malformed_markup_is_a_markup_error() {
    let err = render_err("<div><p></div>", DataContext::new());
    assert!(matches!(err, TemplateError::Markup(_)), "{err:?}");

    let data = DataContext::new().with("Body", "<b>unclosed");
    let err = render_err(r#"<div v-html="Body"></div>"#, data);
    assert!(matches!(err, TemplateError::Markup(_)), "{err:?}");
}
