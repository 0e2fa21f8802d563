//! MySQL renderer.

use super::Renderer;

/// Renders MySQL DDL with back-tick quoted identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlRenderer;

impl MySqlRenderer {
    /// Creates a new MySQL renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Renderer for MySqlRenderer {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }
}
