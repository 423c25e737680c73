//! Panel operations: children, layout manager, traversal group and priority.

use trellis_core::logging::targets;

use super::{ComponentNode, ComponentTree};
use crate::component::ComponentId;
use crate::error::{TreeError, TreeResult};
use crate::layout::LayoutManager;
use crate::traversal::TraversalGroup;

impl ComponentTree {
    /// Add `child` to `panel` with the given layout index and validate the
    /// panel. Returns `child` for chaining.
    ///
    /// # Panics
    ///
    /// Panics if the child already belongs to a panel, if `panel` is not a
    /// panel, if either id is stale, or if the add would create a cycle. Use
    /// [`try_add`](Self::try_add) to get the error instead.
    #[track_caller]
    pub fn add(&mut self, panel: ComponentId, layout_index: i32, child: ComponentId) -> ComponentId {
        match self.try_add(panel, layout_index, child) {
            Ok(child) => child,
            Err(error) => panic!("cannot add component: {error}"),
        }
    }

    /// Fallible form of [`add`](Self::add).
    pub fn try_add(&mut self, panel: ComponentId, layout_index: i32, child: ComponentId) -> TreeResult<ComponentId> {
        self.panel_state(panel)?;
        if child == panel || self.ancestors(panel)?.contains(&child) {
            return Err(TreeError::CycleDetected(child));
        }
        if self.component(child)?.added {
            return Err(TreeError::AlreadyAdded(child));
        }

        let base = self.base_mut(child)?;
        base.added = true;
        base.parent = Some(panel);
        base.layout_index = layout_index;
        let grabbing = u32::from(base.grab_focus) + base.child_grab_focus;
        self.panel_state_mut(panel)?.children.push(child);
        tracing::trace!(target: targets::TREE, ?panel, ?child, layout_index, "added child");

        if grabbing > 0 {
            self.set_focus(panel, true)?;
            self.base_mut(panel)?.child_grab_focus += grabbing;
            for ancestor in self.ancestors(panel)? {
                self.base_mut(ancestor)?.child_grab_focus += grabbing;
            }
        }
        self.validate(panel)?;
        Ok(child)
    }

    /// Add `child` to `panel` and append it to the panel's traversal group.
    ///
    /// # Panics
    ///
    /// Same conditions as [`add`](Self::add).
    #[track_caller]
    pub fn add_to_group(&mut self, panel: ComponentId, layout_index: i32, child: ComponentId) -> ComponentId {
        match self.try_add_to_group(panel, layout_index, child) {
            Ok(child) => child,
            Err(error) => panic!("cannot add component: {error}"),
        }
    }

    /// Fallible form of [`add_to_group`](Self::add_to_group).
    pub fn try_add_to_group(
        &mut self,
        panel: ComponentId,
        layout_index: i32,
        child: ComponentId,
    ) -> TreeResult<ComponentId> {
        self.try_add(panel, layout_index, child)?;
        let defaults = self.traversal_defaults;
        self.panel_state_mut(panel)?
            .group
            .get_or_insert_with(|| TraversalGroup::with_config(defaults))
            .add(child);
        // The group was sorted during validation, before the child joined it.
        self.sort_group(panel)?;
        Ok(child)
    }

    /// Remove and destroy a child, then validate the panel.
    pub fn remove(&mut self, panel: ComponentId, child: ComponentId) -> TreeResult<()> {
        if !self.panel_state(panel)?.children.contains(&child) {
            return Err(TreeError::NotAChild { panel, child });
        }
        self.destroy(child)?;
        self.validate(panel)
    }

    /// Destroy every child of a panel and empty its traversal group.
    pub fn remove_all(&mut self, panel: ComponentId) -> TreeResult<()> {
        let children = self.panel_state(panel)?.children.clone();
        for child in children {
            self.destroy(child)?;
        }
        if let Some(group) = self.panel_state_mut(panel)?.group.as_mut() {
            group.clear();
        }
        Ok(())
    }

    /// Replace the layout manager. The panel is not validated until the next
    /// add, size change or explicit [`validate`](Self::validate).
    pub fn set_layout(&mut self, panel: ComponentId, layout: Box<dyn LayoutManager>) -> TreeResult<()> {
        self.panel_state_mut(panel)?.layout = layout;
        Ok(())
    }

    /// The layout manager of a panel.
    pub fn layout(&self, panel: ComponentId) -> TreeResult<&dyn LayoutManager> {
        Ok(self.panel_state(panel)?.layout.as_ref())
    }

    /// The traversal group of a panel, if any child was added to it.
    pub fn group(&self, panel: ComponentId) -> TreeResult<Option<&TraversalGroup>> {
        Ok(self.panel_state(panel)?.group.as_ref())
    }

    /// The traversal group of a panel, created on first access.
    pub fn group_mut(&mut self, panel: ComponentId) -> TreeResult<&mut TraversalGroup> {
        let defaults = self.traversal_defaults;
        Ok(self
            .panel_state_mut(panel)?
            .group
            .get_or_insert_with(|| TraversalGroup::with_config(defaults)))
    }

    /// Make `child` the panel's priority component: drawn last, hit-tested
    /// first.
    ///
    /// The previous holder is told it lost priority before `child` is told
    /// it gained it.
    pub fn demand_priority(&mut self, panel: ComponentId, child: ComponentId) -> TreeResult<()> {
        let state = self.panel_state(panel)?;
        if !state.children.contains(&child) {
            return Err(TreeError::NotAChild { panel, child });
        }
        let previous = state.priority;
        if previous == Some(child) {
            return Ok(());
        }
        if let Some(previous) = previous {
            self.with_widget(previous, |widget, cx| widget.priority_changed(cx, false));
        }
        self.panel_state_mut(panel)?.priority = Some(child);
        tracing::trace!(target: targets::TREE, ?panel, ?child, ?previous, "priority demanded");
        self.with_widget(child, |widget, cx| widget.priority_changed(cx, true));
        Ok(())
    }

    /// Clear the priority component if `child` holds it.
    pub fn release_priority(&mut self, panel: ComponentId, child: ComponentId) -> TreeResult<()> {
        let state = self.panel_state_mut(panel)?;
        if state.priority != Some(child) {
            return Ok(());
        }
        state.priority = None;
        tracing::trace!(target: targets::TREE, ?panel, ?child, "priority released");
        self.with_widget(child, |widget, cx| widget.priority_changed(cx, false));
        Ok(())
    }

    pub fn priority(&self, panel: ComponentId) -> Option<ComponentId> {
        self.nodes.get(panel).and_then(ComponentNode::panel).and_then(|state| state.priority)
    }

    /// The child currently under the pointer.
    pub fn hovered(&self, panel: ComponentId) -> Option<ComponentId> {
        self.nodes.get(panel).and_then(ComponentNode::panel).and_then(|state| state.hovered)
    }

    /// The child that received the last unreleased button press.
    pub fn pressed(&self, panel: ComponentId) -> Option<ComponentId> {
        self.nodes.get(panel).and_then(ComponentNode::panel).and_then(|state| state.pressed)
    }
}
