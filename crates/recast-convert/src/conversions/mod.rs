//! Built-in leaf conversions.

mod ident;
mod numeric;
mod record;
mod text;
mod time;
mod util;

use crate::registry::EdgeTable;

/// Adds every built-in edge to `table`.
pub(crate) fn register_builtins(table: &mut EdgeTable) {
    numeric::register(table);
    text::register(table);
    time::register(table);
    ident::register(table);
    record::register(table);
}
