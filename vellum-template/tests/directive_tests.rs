use indoc::indoc;
use vellum_core::{DataContext, Value};
use vellum_template::{
    Component, EventHandler, Listener, Rendered, Template, TemplateError, TemplateOptions,
};

fn render(template: &str, data: DataContext) -> Result<Rendered, TemplateError> {
    let app = Component::new("App", template).with_data(data);
    Template::new(&app).render()
}

fn markup(template: &str, data: DataContext) -> String {
    render(template, data).expect("render").to_markup()
}

#[test]
fn for_expands_one_sibling_per_item() {
    let data = DataContext::new().with("Items", vec!["a", "b"]);
    let out = render(r#"<ul><li v-for="Item in Items">{{ Item }}</li></ul>"#, data).unwrap();
    assert_eq!(out.to_markup(), "<ul><li>a</li><li>b</li></ul>");

    let keys: Vec<_> = out.context.keys().filter(|k| k.starts_with("Item")).collect();
    assert_eq!(keys.len(), 3, "Items plus two synthetic keys: {keys:?}");
    assert!(out.context.contains_key("Item0"));
    assert!(out.context.contains_key("Item1"));
}

#[test]
fn for_over_empty_sequence_removes_the_node() {
    let data = DataContext::new().with("Items", Vec::<String>::new());
    assert_eq!(
        markup(r#"<p>a</p><li v-for="Item in Items">x</li><p>b</p>"#, data),
        "<p>a</p><p>b</p>"
    );
}

#[test]
fn loop_variable_does_not_rewrite_longer_identifiers() {
    let data = DataContext::new().with("Items", vec!["a"]);
    assert_eq!(
        markup(r#"<li v-for="Item in Items">{{ Item }} of Items</li>"#, data),
        "<li>a of Items</li>"
    );
}

#[test]
fn nested_loops_with_same_variable_never_collide() {
    let data = DataContext::new()
        .with("Groups", vec![1, 2])
        .with("Items", vec!["a", "b", "c"]);
    let out = render(
        r#"<div v-for="Item in Groups"><span v-for="Item in Items">{{ Item }}</span></div>"#,
        data,
    )
    .unwrap();
    let group = "<div><span>a</span><span>b</span><span>c</span></div>";
    assert_eq!(out.to_markup(), format!("{group}{group}"));
    // two input fields plus one key per iteration across both loops
    assert_eq!(out.context.len(), 2 + 2 + 2 * 3);
}

#[test]
fn loop_runs_before_bind_regardless_of_authored_order() {
    let data = DataContext::new().with("Items", vec!["x", "y"]);
    assert_eq!(
        markup(r#"<a v-bind:title="Item" v-for="Item in Items"></a>"#, data),
        r#"<a title="x"></a><a title="y"></a>"#
    );
}

#[test]
fn loop_over_records_reaches_fields() {
    let todos = Value::from(vec![
        Value::record([("Text", Value::from("write")), ("Done", Value::from(true))]),
        Value::record([("Text", Value::from("test")), ("Done", Value::from(false))]),
    ]);
    let data = DataContext::new().with("Todos", todos);
    assert_eq!(
        markup(
            r#"<li v-for="Todo in Todos" v-if="Todo.Done">{{ Todo.Text }}</li>"#,
            data
        ),
        "<li>write</li>"
    );
}

#[test]
fn if_true_leaves_node_unchanged() {
    let data = DataContext::new().with("Show", true);
    assert_eq!(
        markup(r#"<p v-if="Show" class="x"><b>hi</b> there</p>"#, data),
        r#"<p class="x"><b>hi</b> there</p>"#
    );
}

#[test]
fn if_false_or_absent_removes_node() {
    let data = DataContext::new().with("Show", false).with("Msg", "kept");
    assert_eq!(
        markup(
            r#"<p v-if="Show">gone</p><p v-if="Missing">gone</p><p>{{ Msg }}</p>"#,
            data
        ),
        "<p>kept</p>"
    );
}

#[test]
fn bind_boolean_false_emits_nothing() {
    let data = DataContext::new().with("Done", false);
    assert_eq!(markup(r#"<input v-bind:checked="Done">"#, data), "<input>");

    let data = DataContext::new().with("Done", true);
    assert_eq!(
        markup(r#"<input v-bind:checked="Done">"#, data),
        r#"<input checked="true">"#
    );
}

#[test]
fn bind_stringifies_numbers_and_strings() {
    let data = DataContext::new().with("Count", 3).with("Href", "/a?b&c");
    assert_eq!(
        markup(r#"<a v-bind:href="Href" v-bind:data-n="Count"></a>"#, data),
        r#"<a href="/a?b&amp;c" data-n="3"></a>"#
    );
}

#[test]
fn html_injects_markup_children() {
    let data = DataContext::new()
        .with("Body", "<b>bold</b> {{ Name }}")
        .with("Name", "ann");
    assert_eq!(
        markup(r#"<div v-html="Body"></div>"#, data),
        "<div><b>bold</b> ann</div>"
    );
}

#[test]
fn model_binds_value_and_registers_input_handler() {
    let data = DataContext::new().with("Message", "hello");
    let out = render(r#"<input v-model="Message">"#, data).unwrap();
    assert_eq!(
        out.to_markup(),
        r#"<input input="Message" value="hello">"#
    );
    assert_eq!(
        out.events.handlers("input"),
        &[Listener::new(
            "App",
            EventHandler::Model {
                field: "Message".into()
            }
        )]
    );
}

#[test]
fn on_registers_each_method_once() {
    let data = DataContext::new().with("Items", vec!["a", "b", "c"]);
    let out = render(
        r#"<button v-for="Item in Items" v-on:click="Remove">{{ Item }}</button>"#,
        data,
    )
    .unwrap();
    assert_eq!(
        out.to_markup(),
        r#"<button click="Remove">a</button><button click="Remove">b</button><button click="Remove">c</button>"#
    );
    assert_eq!(out.events.events(), vec!["click"]);
    assert_eq!(out.events.handlers("click").len(), 1);
    assert!(out.events.handlers("submit").is_empty());
}

#[test]
fn non_directive_attributes_pass_through() {
    let out = markup(
        indoc! {r#"
            <form class="f" id="main">
              <label for="n">Name</label>
            </form>
        "#},
        DataContext::new(),
    );
    assert_eq!(
        out,
        "<form class=\"f\" id=\"main\">\n  <label for=\"n\">Name</label>\n</form>\n"
    );
}

#[test]
fn custom_marker_changes_directive_names() {
    let app = Component::new("App", r#"<p x-if="Show" v-if="Show">hi</p>"#)
        .with_data(DataContext::new().with("Show", true));
    let out = Template::new(&app)
        .with_options(TemplateOptions::with_marker("x-"))
        .render()
        .unwrap();
    assert_eq!(out.to_markup(), r#"<p v-if="Show">hi</p>"#);
}

#[test]
fn render_with_merges_data_over_component_data() {
    let app = Component::new("App", "<p>{{ A }} {{ B }}</p>")
        .with_data(DataContext::new().with("A", "own").with("B", "own"));
    let out = Template::new(&app)
        .render_with(DataContext::new().with("B", "given"))
        .unwrap();
    assert_eq!(out.to_markup(), "<p>own given</p>");
}

#[test]
fn loop_variable_matching_directive_names_leaves_directives_intact() {
    let data = DataContext::new().with("Items", vec!["a"]);
    assert_eq!(
        markup(r#"<li v-for="v in Items" v-bind:title="v">{{ v }}</li>"#, data.clone()),
        r#"<li title="a">a</li>"#
    );
    assert_eq!(
        markup(
            r#"<button v-for="on in Items" v-on:click="Pick">{{ on }}</button>"#,
            data
        ),
        r#"<button click="Pick">a</button>"#
    );
}
