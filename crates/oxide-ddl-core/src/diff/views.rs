//! View differ.

use tracing::debug;

use crate::diff::{CreateViewOp, Operation};
use crate::render::Renderer;
use crate::schema::{SqlOption, ViewDefinition};

/// Replaces a view whose rendered definition changed.
///
/// The replacement carries the full new definition with `OR REPLACE`
/// forced in front of its other options.
pub fn diff_view<R: Renderer + ?Sized>(
    renderer: &R,
    old: &ViewDefinition,
    new: &ViewDefinition,
) -> Option<Operation> {
    if renderer.render_view(old) == renderer.render_view(new) {
        return None;
    }

    debug!(view = %new.name, "view changed");
    let mut view = new.clone();
    if !view.options.has("OR REPLACE") {
        view.options.prepend(SqlOption::flag("OR REPLACE"));
    }
    Some(CreateViewOp { view }.into())
}
