//! Control-hint panel.

use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, instrument};

use crate::error::ShellError;
use crate::surface::{ContainerId, SharedSurface};

/// One key hint.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct HelperItem {
    #[new(into)]
    key: String,
    #[new(into)]
    description: String,
}

impl HelperItem {
    /// Single line shown on the surface.
    #[instrument(skip(self))]
    pub fn line(&self) -> String {
        format!("{:<14}{}", self.key, self.description)
    }
}

/// Hints shown while the menu is active.
#[instrument]
pub fn default_helper_list() -> Vec<HelperItem> {
    vec![
        HelperItem::new("arrow up ↑", "Scroll up"),
        HelperItem::new("arrow down ↓", "Scroll down"),
        HelperItem::new("enter", "Launch game"),
    ]
}

/// Owns the hint container and rebuilds it on every change.
#[derive(Debug)]
pub struct HelperManager {
    surface: SharedSurface,
    container: Option<ContainerId>,
    list: Vec<HelperItem>,
}

impl HelperManager {
    /// Creates an unbound hint panel.
    #[instrument(skip_all)]
    pub fn new(surface: SharedSurface) -> Self {
        Self {
            surface,
            container: None,
            list: Vec::new(),
        }
    }

    /// Binds the hint container.
    #[instrument(skip(self))]
    pub fn set_wrapper(&mut self, container: ContainerId) -> Result<(), ShellError> {
        if !self.surface.borrow().contains(&container) {
            return Err(ShellError::configuration(format!(
                "Helper container '{}' not on surface",
                container
            )));
        }
        self.container = Some(container);
        Ok(())
    }

    /// Replaces the hints and re-renders.
    #[instrument(skip(self, list), fields(count = list.len()))]
    pub fn update_helper_list(&mut self, list: Vec<HelperItem>) -> Result<(), ShellError> {
        self.list = list;
        self.show_list()
    }

    /// Installs the menu hints.
    #[instrument(skip(self))]
    pub fn set_default_list(&mut self) -> Result<(), ShellError> {
        self.update_helper_list(default_helper_list())
    }

    /// Hints currently shown.
    pub fn list(&self) -> &[HelperItem] {
        &self.list
    }

    #[instrument(skip(self))]
    fn show_list(&self) -> Result<(), ShellError> {
        let container = self
            .container
            .as_ref()
            .ok_or_else(|| ShellError::configuration("Helper used before its container was set"))?;
        let lines: Vec<String> = self.list.iter().map(HelperItem::line).collect();
        debug!(count = lines.len(), "Rendering helper list");
        self.surface.borrow_mut().render_list(container, &lines)
    }
}
