use vellum_dom::Attrs;
use vellum_template::{DirectiveTable, order_attrs};

fn names(attrs: &Attrs) -> Vec<&str> {
    attrs.names().collect()
}

#[test]
fn directives_follow_fixed_precedence() {
    let mut attrs: Attrs = vec![
        ("v-bind:x", "X"),
        ("v-if", "Show"),
        ("v-on:click", "Add"),
        ("v-for", "Item in Items"),
        ("v-html", "Body"),
        ("v-model", "Name"),
    ]
    .into();
    order_attrs(&mut attrs, &DirectiveTable::default());
    assert_eq!(
        names(&attrs),
        vec!["v-for", "v-if", "v-model", "v-on:click", "v-bind:x", "v-html"]
    );
}

#[test]
fn other_attributes_keep_authored_order_after_directives() {
    let mut attrs: Attrs = vec![
        ("class", "a"),
        ("v-once", ""),
        ("v-bind:title", "T"),
        ("id", "b"),
        ("v-bind:href", "H"),
        ("v-if", "Show"),
    ]
    .into();
    order_attrs(&mut attrs, &DirectiveTable::default());
    assert_eq!(
        names(&attrs),
        vec!["v-if", "v-bind:title", "v-bind:href", "class", "v-once", "id"]
    );
    assert_eq!(attrs.len(), 6);
}

#[test]
fn ordering_uses_the_configured_marker() {
    let mut attrs: Attrs = vec![("x-bind:a", "A"), ("v-if", "S"), ("x-for", "I in L")].into();
    order_attrs(&mut attrs, &DirectiveTable::with_marker("x-"));
    assert_eq!(names(&attrs), vec!["x-for", "x-bind:a", "v-if"]);
}
