use vellum_core::DataContext;
use vellum_dom::Node;

/// Monotonic counter behind synthetic loop keys. One per execution.
#[derive(Debug, Default)]
pub struct NodeIds {
    next: u64,
}

impl NodeIds {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Returns `<var><id>` for the next id whose key is not yet bound in `ctx`.
    ///
    /// Skipping bound keys keeps keys unique when concatenations coincide
    /// (`Item1` + `1` and `Item` + `11`) and never shadows caller data.
    pub fn synthetic_key(&mut self, var: &str, ctx: &DataContext) -> String {
        loop {
            let key = format!("{var}{}", self.next_id());
            if !ctx.contains_key(&key) {
                return key;
            }
        }
    }
}

/// Replaces each occurrence of `ident` that is not part of a longer
/// identifier, so renaming `Item` leaves `Items` and `MyItem` alone.
pub fn replace_ident(haystack: &str, ident: &str, replacement: &str) -> String {
    if ident.is_empty() {
        return haystack.to_string();
    }
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for (start, _) in haystack.match_indices(ident) {
        if start < last {
            continue;
        }
        let end = start + ident.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        if before.is_some_and(is_ident_char) || after.is_some_and(is_ident_char) {
            continue;
        }
        out.push_str(&haystack[last..start]);
        out.push_str(replacement);
        last = end;
    }
    out.push_str(&haystack[last..]);
    out
}

/// Applies [`replace_ident`] to every attribute value and text node below
/// `node`. Tag and attribute names are left alone, so a loop variable such
/// as `on` cannot rewrite the `v-on:click` directive itself.
pub fn rename_in_node(node: &mut Node, ident: &str, replacement: &str) {
    match node {
        Node::Text(t) => *t = replace_ident(t, ident, replacement),
        Node::Element(el) => {
            for attr in el.attrs.iter_mut() {
                attr.value = replace_ident(&attr.value, ident, replacement);
            }
            for child in &mut el.children {
                rename_in_node(child, ident, replacement);
            }
        }
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
