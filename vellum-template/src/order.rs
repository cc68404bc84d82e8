use vellum_dom::{Attr, Attrs};

use crate::directive::DirectiveTable;

/// Reorders `attrs` so known directives come first, in table precedence,
/// followed by every other attribute in authored order. Within a slot the
/// authored order is kept; nothing is added or dropped.
pub fn order_attrs(attrs: &mut Attrs, table: &DirectiveTable) {
    if attrs.len() < 2 {
        return;
    }
    let rest = table.len();
    let mut slots: Vec<Vec<Attr>> = vec![Vec::new(); rest + 1];
    for attr in std::mem::take(attrs) {
        let slot = table.slot(&attr.name).unwrap_or(rest);
        slots[slot].push(attr);
    }
    *attrs = slots.into_iter().flatten().collect();
}
