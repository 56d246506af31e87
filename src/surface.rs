//! Rendering surface the UI managers write to.
//!
//! Managers only touch the containers they were handed at setup. The
//! terminal front end draws whatever the [`MemorySurface`] holds.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use derive_getters::Getters;
use derive_more::Display;
use tracing::{debug, instrument};

use crate::error::ShellError;

/// Name of a region on the surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a container id.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContainerId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Minimal rendering interface.
///
/// Every operation on a container the surface does not know is an error.
pub trait Surface: fmt::Debug {
    /// True if `container` exists on this surface.
    fn contains(&self, container: &ContainerId) -> bool;

    /// Replaces the whole item list of `container` and clears its marker.
    fn render_list(&mut self, container: &ContainerId, items: &[String]) -> Result<(), ShellError>;

    /// Replaces the text of `container`.
    fn set_text(&mut self, container: &ContainerId, text: &str) -> Result<(), ShellError>;

    /// Moves the single active marker of `container` to `index`, or clears it.
    fn mark_active(
        &mut self,
        container: &ContainerId,
        index: Option<usize>,
    ) -> Result<(), ShellError>;
}

/// Surface handle shared by the UI managers.
pub type SharedSurface = Rc<RefCell<dyn Surface>>;

/// Content of one container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct Panel {
    items: Vec<String>,
    text: String,
    active: Option<usize>,
}

/// In-memory retained surface.
#[derive(Debug, Default)]
pub struct MemorySurface {
    panels: BTreeMap<ContainerId, Panel>,
}

impl MemorySurface {
    /// Creates a surface with the given containers, all empty.
    #[instrument(skip(containers))]
    pub fn with_containers(containers: impl IntoIterator<Item = ContainerId>) -> Self {
        let panels: BTreeMap<ContainerId, Panel> = containers
            .into_iter()
            .map(|id| (id, Panel::default()))
            .collect();
        debug!(count = panels.len(), "Creating memory surface");
        Self { panels }
    }

    /// Adds an empty container. Existing content is kept.
    #[instrument(skip(self))]
    pub fn add_container(&mut self, container: ContainerId) {
        self.panels.entry(container).or_default();
    }

    /// Content of `container`.
    #[instrument(skip(self))]
    pub fn panel(&self, container: &ContainerId) -> Option<&Panel> {
        self.panels.get(container)
    }

    /// Text of `container`, empty if unknown.
    #[instrument(skip(self))]
    pub fn text(&self, container: &ContainerId) -> &str {
        self.panels.get(container).map_or("", |p| p.text.as_str())
    }

    #[instrument(skip(self))]
    fn panel_mut(&mut self, container: &ContainerId) -> Result<&mut Panel, ShellError> {
        self.panels
            .get_mut(container)
            .ok_or_else(|| ShellError::surface(format!("Unknown container '{}'", container)))
    }
}

impl Surface for MemorySurface {
    fn contains(&self, container: &ContainerId) -> bool {
        self.panels.contains_key(container)
    }

    #[instrument(skip(self, items), fields(count = items.len()))]
    fn render_list(&mut self, container: &ContainerId, items: &[String]) -> Result<(), ShellError> {
        let panel = self.panel_mut(container)?;
        panel.items = items.to_vec();
        panel.active = None;
        Ok(())
    }

    #[instrument(skip(self))]
    fn set_text(&mut self, container: &ContainerId, text: &str) -> Result<(), ShellError> {
        self.panel_mut(container)?.text = text.to_string();
        Ok(())
    }

    #[instrument(skip(self))]
    fn mark_active(
        &mut self,
        container: &ContainerId,
        index: Option<usize>,
    ) -> Result<(), ShellError> {
        let panel = self.panel_mut(container)?;
        if let Some(i) = index
            && i >= panel.items.len()
        {
            return Err(ShellError::surface(format!(
                "Index {} out of range for '{}' ({} items)",
                i,
                container,
                panel.items.len()
            )));
        }
        panel.active = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_container_is_rejected() {
        let mut surface = MemorySurface::with_containers([ContainerId::from("menu")]);
        let err = surface
            .set_text(&ContainerId::from("nowhere"), "x")
            .expect_err("unknown container");
        assert_eq!(err.kind, crate::ShellErrorKind::Surface);
    }

    #[test]
    fn test_render_list_clears_marker() {
        let menu = ContainerId::from("menu");
        let mut surface = MemorySurface::with_containers([menu.clone()]);
        surface
            .render_list(&menu, &["a".to_string(), "b".to_string()])
            .expect("render");
        surface.mark_active(&menu, Some(1)).expect("mark");
        surface.render_list(&menu, &["c".to_string()]).expect("render");
        assert_eq!(surface.panel(&menu).and_then(|p| *p.active()), None);
    }

    #[test]
    fn test_marker_must_point_at_an_item() {
        let menu = ContainerId::from("menu");
        let mut surface = MemorySurface::with_containers([menu.clone()]);
        surface.render_list(&menu, &["a".to_string()]).expect("render");
        assert!(surface.mark_active(&menu, Some(1)).is_err());
    }
}
