use indoc::indoc;
use std::fs;
use std::path::{Path, PathBuf};
use vellum_cli::{RenderOptions, load_data, render_cmd, write_output};

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

const APP: &str = indoc! {r#"
    <template>
    <div id="app"><h1>{{ Title }}</h1><ul><todoitem v-for="Todo in Todos" v-bind:text="Todo.Text"></todoitem></ul></div>
    </template>
    <script>
      { "data": { "Title": "Todos", "Todos": [{ "Text": "one" }] } }
    </script>
"#};

const TODO_ITEM: &str = indoc! {r#"
    <template><li>{{ Text }}</li></template>
    <script>{ "props": ["text"] }</script>
"#};

#[test]
fn renders_root_with_registered_components() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = write(dir.path(), "App.vue", APP);
    let item = write(dir.path(), "TodoItem.vue", TODO_ITEM);

    let out = render_cmd(&RenderOptions {
        component: app,
        components: vec![item],
        ..Default::default()
    })
    .expect("render");
    assert_eq!(
        out.trim(),
        r#"<div id="app"><h1>Todos</h1><ul><li>one</li></ul></div>"#
    );
}

#[test]
fn data_file_overrides_component_data() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = write(dir.path(), "App.vue", APP);
    let item = write(dir.path(), "TodoItem.vue", TODO_ITEM);
    let data = write(
        dir.path(),
        "data.json",
        r#"{ "Title": "Mine", "Todos": [{ "Text": "a" }, { "Text": "b" }] }"#,
    );

    let out = render_cmd(&RenderOptions {
        component: app,
        data: Some(data),
        components: vec![item],
        prefix: None,
    })
    .expect("render");
    assert!(out.contains("<h1>Mine</h1>"), "{out}");
    assert!(out.contains("<li>a</li><li>b</li>"), "{out}");
}

#[test]
fn custom_prefix_is_honoured() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = write(
        dir.path(),
        "app.vue",
        r#"<template><p x-if="Show">on</p><p x-if="Hide">off</p></template><script>{"data":{"Show":true,"Hide":false}}</script>"#,
    );
    let out = render_cmd(&RenderOptions {
        component: app,
        prefix: Some("x-".into()),
        ..Default::default()
    })
    .expect("render");
    assert_eq!(out, "<p>on</p>");
}

#[test]
fn errors_carry_file_context() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.vue");
    let err = render_cmd(&RenderOptions {
        component: missing,
        ..Default::default()
    })
    .unwrap_err();
    assert!(format!("{err:#}").contains("failed to read"), "{err:#}");

    let app = write(
        dir.path(),
        "app.vue",
        r#"<template><a v-bind:href="Link"></a></template>"#,
    );
    let err = render_cmd(&RenderOptions {
        component: app,
        ..Default::default()
    })
    .unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("failed to render"), "{msg}");
    assert!(msg.contains("unknown data field: Link"), "{msg}");
}

#[test]
fn data_must_be_a_json_object() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = write(dir.path(), "data.json", "[1, 2]");
    let err = load_data(&data).unwrap_err();
    assert!(format!("{err:#}").contains("invalid data"), "{err:#}");
}

#[test]
fn output_is_written_to_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("out/index.html");
    write_output("<p>x</p>", Some(&out)).expect("write");
    assert_eq!(fs::read_to_string(&out).unwrap(), "<p>x</p>");
}
