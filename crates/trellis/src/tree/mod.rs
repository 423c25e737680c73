//! The component tree.
//!
//! [`ComponentTree`] is the arena that owns every component. Components are
//! addressed by [`ComponentId`]; the parent pointer, the panel's hovered,
//! pressed and priority children, and traversal group members are all plain
//! ids into this arena, so the panel's child list stays the only owning
//! reference.
//!
//! Every mutation goes through the tree so that re-layout and focus rules are
//! applied synchronously, before the call returns:
//!
//! - changing a child's preferred size or visibility re-validates its parent
//! - adding a child validates the panel
//! - gaining grab focus bumps every ancestor's grab counter
//!
//! # Modules
//!
//! - `panel` - Adding and removing children, layout, group and priority
//! - `dispatch` - Mouse and keyboard routing
//! - `paint` - Drawing through a [`Renderer`](trellis_render::Renderer)
//! - `debug` - Tree dumps

mod debug;
mod dispatch;
mod paint;
mod panel;

pub use paint::BORDER_WIDTH;

use std::any::Any;
use std::fmt;

use slotmap::SlotMap;
use trellis_core::logging::{span_names, targets};
use trellis_render::{Color, Point, Rect, Size, Sprite};

use crate::component::capability::WidgetRequest;
use crate::component::{ComponentBase, ComponentId, ComponentKind, Widget, WidgetContext};
use crate::error::{TreeError, TreeResult};
use crate::layout::{FlowLayout, LayoutChild, LayoutContainer, LayoutManager};
use crate::traversal::{TraversalConfig, TraversalGroup};

/// Default preferred (and initial) size of a new panel.
pub const DEFAULT_PANEL_SIZE: Size = Size::new(50.0, 50.0);

/// Panel-only state.
pub(crate) struct PanelState {
    pub(crate) children: Vec<ComponentId>,
    pub(crate) layout: Box<dyn LayoutManager>,
    pub(crate) group: Option<TraversalGroup>,
    /// Child currently under the pointer.
    pub(crate) hovered: Option<ComponentId>,
    /// Child that received the last button press.
    pub(crate) pressed: Option<ComponentId>,
    /// Child drawn last and hit-tested first.
    pub(crate) priority: Option<ComponentId>,
}

impl PanelState {
    fn new(layout: Box<dyn LayoutManager>) -> Self {
        Self {
            children: Vec::new(),
            layout,
            group: None,
            hovered: None,
            pressed: None,
            priority: None,
        }
    }

    /// Forget every transient reference to `child`.
    fn forget(&mut self, child: ComponentId) {
        if self.hovered == Some(child) {
            self.hovered = None;
        }
        if self.pressed == Some(child) {
            self.pressed = None;
        }
        if self.priority == Some(child) {
            self.priority = None;
        }
    }
}

pub(crate) enum NodeKind {
    Leaf,
    Panel(Box<PanelState>),
}

pub(crate) struct ComponentNode {
    pub(crate) base: ComponentBase,
    pub(crate) kind: NodeKind,
    pub(crate) widget: Option<Box<dyn Widget>>,
}

impl ComponentNode {
    fn panel(&self) -> Option<&PanelState> {
        match &self.kind {
            NodeKind::Panel(panel) => Some(panel),
            NodeKind::Leaf => None,
        }
    }

    fn panel_mut(&mut self) -> Option<&mut PanelState> {
        match &mut self.kind {
            NodeKind::Panel(panel) => Some(panel),
            NodeKind::Leaf => None,
        }
    }
}

/// Arena owning all components of one UI.
///
/// # Example
///
/// ```
/// use trellis::{BorderLayout, ComponentTree};
/// use trellis_render::Size;
///
/// let mut tree = ComponentTree::new();
/// let root = tree.create_panel_with_layout(Box::new(BorderLayout));
/// tree.set_size(root, Size::new(200.0, 100.0)).unwrap();
///
/// let north = tree.create_empty();
/// tree.set_preferred_size(north, Size::new(0.0, 20.0)).unwrap();
/// tree.add(root, BorderLayout::NORTH, north);
///
/// let bounds = tree.component(north).unwrap().bounds();
/// assert_eq!(bounds.top(), 100.0);
/// assert_eq!(bounds.height(), 20.0);
/// ```
pub struct ComponentTree {
    nodes: SlotMap<ComponentId, ComponentNode>,
    traversal_defaults: TraversalConfig,
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComponentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentTree")
            .field("components", &self.nodes.len())
            .field("traversal_defaults", &self.traversal_defaults)
            .finish()
    }
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::with_traversal_defaults(TraversalConfig::default())
    }

    /// Create a tree whose panels build their traversal groups from `config`.
    pub fn with_traversal_defaults(config: TraversalConfig) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            traversal_defaults: config,
        }
    }

    #[inline]
    pub fn traversal_defaults(&self) -> TraversalConfig {
        self.traversal_defaults
    }

    // =========================================================================
    // Creation and destruction
    // =========================================================================

    /// Create a leaf component driven by `widget`.
    pub fn create_component(&mut self, widget: impl Widget) -> ComponentId {
        let id = self.insert(NodeKind::Leaf, Some(Box::new(widget)), ComponentBase::default());
        self.with_widget(id, |widget, cx| widget.attached(cx));
        id
    }

    /// Create a leaf component with base behavior only.
    pub fn create_empty(&mut self) -> ComponentId {
        self.insert(NodeKind::Leaf, None, ComponentBase::default())
    }

    /// Create a panel with a [`FlowLayout`].
    pub fn create_panel(&mut self) -> ComponentId {
        self.create_panel_with_layout(Box::new(FlowLayout::new()))
    }

    /// Create a panel with the given layout manager.
    ///
    /// Panels start at 50x50 with a transparent border.
    pub fn create_panel_with_layout(&mut self, layout: Box<dyn LayoutManager>) -> ComponentId {
        let base = ComponentBase {
            size: DEFAULT_PANEL_SIZE,
            preferred_size: DEFAULT_PANEL_SIZE,
            border: Color::TRANSPARENT,
            ..ComponentBase::default()
        };
        self.insert(NodeKind::Panel(Box::new(PanelState::new(layout))), None, base)
    }

    fn insert(&mut self, kind: NodeKind, widget: Option<Box<dyn Widget>>, base: ComponentBase) -> ComponentId {
        let type_name = kind_name(&kind, widget.as_deref());
        let id = self.nodes.insert(ComponentNode { base, kind, widget });
        tracing::trace!(target: targets::TREE, ?id, type_name, "created component");
        id
    }

    /// Destroy a component and everything below it.
    ///
    /// The component is detached from its parent first: removed from the
    /// child list and traversal group, and forgotten as hovered, pressed or
    /// priority child. Grab-focus counts it contributed are taken back from
    /// its ancestors.
    #[tracing::instrument(skip(self), target = "trellis::tree", level = "trace")]
    pub fn destroy(&mut self, id: ComponentId) -> TreeResult<()> {
        let base = self.component(id)?;
        let contributed = u32::from(base.grab_focus) + base.child_grab_focus;
        if let Some(parent) = base.parent {
            if let Some(panel) = self.nodes.get_mut(parent).and_then(ComponentNode::panel_mut) {
                panel.children.retain(|&child| child != id);
                panel.forget(id);
                if let Some(group) = panel.group.as_mut() {
                    group.remove(id);
                }
            }
            if contributed > 0 {
                for ancestor in self.ancestors(id)? {
                    if let Some(node) = self.nodes.get_mut(ancestor) {
                        node.base.child_grab_focus = node.base.child_grab_focus.saturating_sub(contributed);
                    }
                }
            }
        }

        let descendants = self.descendants(id)?;
        tracing::trace!(target: targets::TREE, ?id, descendant_count = descendants.len(), "destroying subtree");
        for descendant in descendants {
            self.nodes.remove(descendant);
        }
        self.nodes.remove(id);
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    #[inline]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live components.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Shared state of a component, or `None` for a stale id.
    #[inline]
    pub fn get(&self, id: ComponentId) -> Option<&ComponentBase> {
        self.nodes.get(id).map(|node| &node.base)
    }

    /// Shared state of a component.
    pub fn component(&self, id: ComponentId) -> TreeResult<&ComponentBase> {
        self.get(id).ok_or(TreeError::InvalidComponent(id))
    }

    fn node(&self, id: ComponentId) -> TreeResult<&ComponentNode> {
        self.nodes.get(id).ok_or(TreeError::InvalidComponent(id))
    }

    fn node_mut(&mut self, id: ComponentId) -> TreeResult<&mut ComponentNode> {
        self.nodes.get_mut(id).ok_or(TreeError::InvalidComponent(id))
    }

    fn base_mut(&mut self, id: ComponentId) -> TreeResult<&mut ComponentBase> {
        self.node_mut(id).map(|node| &mut node.base)
    }

    pub(crate) fn panel_state(&self, id: ComponentId) -> TreeResult<&PanelState> {
        self.node(id)?.panel().ok_or(TreeError::NotAPanel(id))
    }

    pub(crate) fn panel_state_mut(&mut self, id: ComponentId) -> TreeResult<&mut PanelState> {
        self.node_mut(id)?.panel_mut().ok_or(TreeError::NotAPanel(id))
    }

    pub fn kind(&self, id: ComponentId) -> TreeResult<ComponentKind> {
        Ok(match self.node(id)?.kind {
            NodeKind::Leaf => ComponentKind::Leaf,
            NodeKind::Panel(_) => ComponentKind::Panel,
        })
    }

    #[inline]
    pub fn is_panel(&self, id: ComponentId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.panel().is_some())
    }

    /// Type name used in dumps: the widget's name, `Panel` or `Component`.
    pub fn type_name(&self, id: ComponentId) -> TreeResult<&'static str> {
        let node = self.node(id)?;
        Ok(kind_name(&node.kind, node.widget.as_deref()))
    }

    /// The widget attached to `id`, if it is a `T`.
    pub fn widget<T: Widget>(&self, id: ComponentId) -> Option<&T> {
        let widget: &dyn Widget = self.nodes.get(id)?.widget.as_deref()?;
        (widget as &dyn Any).downcast_ref::<T>()
    }

    /// Mutable access to the widget attached to `id`, if it is a `T`.
    ///
    /// Changes made here bypass re-layout. Use [`update_widget`](Self::update_widget)
    /// when the widget needs to resize or fire its action.
    pub fn widget_mut<T: Widget>(&mut self, id: ComponentId) -> Option<&mut T> {
        let widget: &mut dyn Widget = self.nodes.get_mut(id)?.widget.as_deref_mut()?;
        (widget as &mut dyn Any).downcast_mut::<T>()
    }

    /// Run `f` against the `T` widget of `id` with a [`WidgetContext`], then
    /// apply what it requested.
    pub fn update_widget<T, R>(&mut self, id: ComponentId, f: impl FnOnce(&mut T, &mut WidgetContext<'_>) -> R) -> Option<R>
    where
        T: Widget,
    {
        self.with_widget(id, |widget, cx| {
            (widget as &mut dyn Any).downcast_mut::<T>().map(|widget| f(widget, cx))
        })
        .flatten()
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.get(id).and_then(|base| base.parent)
    }

    /// Children of a panel in insertion order. Empty for a leaf.
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.nodes
            .get(id)
            .and_then(ComponentNode::panel)
            .map_or(&[], |panel| panel.children.as_slice())
    }

    /// Ancestors from the immediate parent to the root.
    pub fn ancestors(&self, id: ComponentId) -> TreeResult<Vec<ComponentId>> {
        let mut result = Vec::new();
        let mut current = self.component(id)?.parent;
        while let Some(ancestor) = current {
            result.push(ancestor);
            current = self.parent(ancestor);
        }
        Ok(result)
    }

    /// All descendants, children before their own children.
    pub fn descendants(&self, id: ComponentId) -> TreeResult<Vec<ComponentId>> {
        self.node(id)?;
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            for &child in self.children(current).iter().rev() {
                result.push(child);
                stack.push(child);
            }
        }
        Ok(result)
    }

    // =========================================================================
    // Component properties
    // =========================================================================

    pub fn set_name(&mut self, id: ComponentId, name: impl Into<String>) -> TreeResult<()> {
        self.base_mut(id)?.name = Some(name.into());
        Ok(())
    }

    /// Record the size this component asks for and re-validate its parent.
    ///
    /// A component without a parent takes the preferred size directly.
    pub fn set_preferred_size(&mut self, id: ComponentId, size: Size) -> TreeResult<()> {
        let base = self.base_mut(id)?;
        base.preferred_size = size;
        if base.parent.is_none() {
            base.size = size;
        }
        self.validate_parent(id)
    }

    /// Show or hide a component.
    ///
    /// Only an actual change re-validates the parent. Hiding clears the
    /// parent's hover tracking for this component. A press stays recorded so
    /// the release is still reported as an outside release.
    pub fn set_visible(&mut self, id: ComponentId, visible: bool) -> TreeResult<()> {
        let base = self.base_mut(id)?;
        if base.visible == visible {
            return Ok(());
        }
        base.visible = visible;
        let parent = base.parent;
        if !visible
            && let Some(panel) = parent.and_then(|parent| self.nodes.get_mut(parent)).and_then(ComponentNode::panel_mut)
            && panel.hovered == Some(id)
        {
            panel.hovered = None;
        }
        self.validate_parent(id)
    }

    /// Move a component. Normally only layout managers place children.
    pub fn set_location(&mut self, id: ComponentId, location: Point) -> TreeResult<()> {
        self.base_mut(id)?.location = location;
        Ok(())
    }

    /// Resize a component without re-validating it.
    pub fn set_size(&mut self, id: ComponentId, size: Size) -> TreeResult<()> {
        self.base_mut(id)?.size = size;
        Ok(())
    }

    pub fn set_layout_index(&mut self, id: ComponentId, layout_index: i32) -> TreeResult<()> {
        self.base_mut(id)?.layout_index = layout_index;
        Ok(())
    }

    pub fn set_background_color(&mut self, id: ComponentId, color: Color) -> TreeResult<()> {
        self.base_mut(id)?.background = color;
        Ok(())
    }

    pub fn set_border_color(&mut self, id: ComponentId, color: Color) -> TreeResult<()> {
        self.base_mut(id)?.border = color;
        Ok(())
    }

    /// Hit-test `id` over a local `area` instead of its bounds.
    pub fn set_hit_area(&mut self, id: ComponentId, area: Option<Rect>) -> TreeResult<()> {
        self.base_mut(id)?.hit_area = area;
        Ok(())
    }

    pub fn set_background_sprite(&mut self, id: ComponentId, sprite: Option<Sprite>) -> TreeResult<()> {
        self.base_mut(id)?.sprite = sprite;
        Ok(())
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Set or clear focus.
    ///
    /// Gaining focus always succeeds. Losing it is refused while a descendant
    /// grabs focus, unless the component grabs focus itself. Listeners fire
    /// only on an actual change. Clearing a panel's focus also clears its
    /// children.
    pub fn set_focus(&mut self, id: ComponentId, focus: bool) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        let base = &mut node.base;
        if base.focus != focus && (focus || base.grab_focus || base.child_grab_focus < 1) {
            base.focus = focus;
            tracing::trace!(target: targets::FOCUS, ?id, focus, "focus changed");
            base.listeners.focus.emit((id, focus));
        }
        let children = match node.panel() {
            Some(panel) if !focus => panel.children.clone(),
            _ => Vec::new(),
        };
        for child in children {
            self.set_focus(child, false)?;
        }
        Ok(())
    }

    /// Declare (or withdraw) a demand to keep focus.
    ///
    /// Grabbing takes focus and bumps the grab counter of every ancestor.
    /// Releasing takes the counts back only while the parent's counter is
    /// above one, so the last release of several leaves the ancestors counting
    /// one grabber.
    pub fn set_grab_focus(&mut self, id: ComponentId, grab: bool) -> TreeResult<()> {
        let base = self.base_mut(id)?;
        if base.grab_focus == grab {
            return Ok(());
        }
        base.grab_focus = grab;
        let parent = base.parent;

        if grab {
            self.set_focus(id, true)?;
            for ancestor in self.ancestors(id)? {
                self.base_mut(ancestor)?.child_grab_focus += 1;
            }
        } else {
            let parent_count = parent.and_then(|parent| self.get(parent)).map_or(0, |base| base.child_grab_focus);
            if parent_count > 1 {
                for ancestor in self.ancestors(id)? {
                    let base = self.base_mut(ancestor)?;
                    base.child_grab_focus = base.child_grab_focus.saturating_sub(1);
                }
            }
        }
        tracing::trace!(target: targets::FOCUS, ?id, grab, "grab focus changed");
        Ok(())
    }

    // =========================================================================
    // Actions and panel switching
    // =========================================================================

    /// Fire a component's action: the widget hook, then the action listeners.
    pub fn do_action(&mut self, id: ComponentId) -> TreeResult<()> {
        self.node(id)?;
        self.with_widget(id, |widget, cx| widget.on_action(cx));
        self.component(id)?.listeners.action.emit(id);
        Ok(())
    }

    /// Tell a component that the frame made its panel active or inactive.
    ///
    /// A panel becoming active validates itself first, then notifies its
    /// children, then its own listeners.
    pub fn panel_changed(&mut self, id: ComponentId, active: bool) -> TreeResult<()> {
        if self.is_panel(id) {
            if active {
                self.validate(id)?;
            }
            for child in self.children(id).to_vec() {
                self.panel_changed(child, active)?;
            }
        }
        self.component(id)?.listeners.panel_change.emit((id, active));
        Ok(())
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Re-run the layout of a panel, then of every child panel, then re-sort
    /// the traversal group by screen position. Does nothing for a leaf.
    pub fn validate(&mut self, id: ComponentId) -> TreeResult<()> {
        let node = self.node(id)?;
        let Some(panel) = node.panel() else {
            return Ok(());
        };
        let _span = tracing::trace_span!(target: targets::LAYOUT, span_names::VALIDATE, ?id).entered();

        let mut slots: Vec<LayoutChild> = panel
            .children
            .iter()
            .filter_map(|&child| self.get(child).map(|base| LayoutChild::from_base(child, base)))
            .collect();
        panel
            .layout
            .layout_container(&mut LayoutContainer::new(node.base.size, &mut slots));
        let children = panel.children.clone();

        for slot in &slots {
            if let Some(rect) = slot.placement() {
                let base = self.base_mut(slot.id())?;
                base.location = rect.origin;
                base.size = rect.size;
            }
        }
        tracing::trace!(target: targets::LAYOUT, ?id, child_count = children.len(), "laid out panel");

        for child in children {
            self.validate(child)?;
        }
        self.sort_group(id)
    }

    /// Validate the parent of `id`, if it has one.
    pub fn validate_parent(&mut self, id: ComponentId) -> TreeResult<()> {
        match self.component(id)?.parent {
            Some(parent) => self.validate(parent),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Widget hooks
    // =========================================================================

    /// Call into the widget of `id` with a context, then apply the requests
    /// the hook made. `None` if the component has no widget.
    pub(crate) fn with_widget<R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut dyn Widget, &mut WidgetContext<'_>) -> R,
    ) -> Option<R> {
        let node = self.nodes.get_mut(id)?;
        let widget = node.widget.as_deref_mut()?;
        let mut cx = WidgetContext::new(id, &node.base);
        let result = f(widget, &mut cx);
        let requests = cx.into_requests();
        self.apply_requests(id, requests);
        Some(result)
    }

    fn apply_requests(&mut self, id: ComponentId, requests: Vec<WidgetRequest>) {
        for request in requests {
            let result = match request {
                WidgetRequest::DoAction => self.do_action(id),
                WidgetRequest::SetFocus(focus) => self.set_focus(id, focus),
                WidgetRequest::SetPreferredSize(size) => self.set_preferred_size(id, size),
                WidgetRequest::SetBackgroundColor(color) => self.set_background_color(id, color),
                WidgetRequest::SetBorderColor(color) => self.set_border_color(id, color),
                WidgetRequest::DemandPriority => match self.parent(id) {
                    Some(parent) => self.demand_priority(parent, id),
                    None => Ok(()),
                },
                WidgetRequest::ReleasePriority => match self.parent(id) {
                    Some(parent) => self.release_priority(parent, id),
                    None => Ok(()),
                },
                WidgetRequest::SetHitArea(area) => self.set_hit_area(id, area),
            };
            if let Err(error) = result {
                tracing::warn!(target: targets::TREE, ?id, ?request, %error, "widget request failed");
            }
        }
    }
}

fn kind_name(kind: &NodeKind, widget: Option<&dyn Widget>) -> &'static str {
    match (kind, widget) {
        (NodeKind::Panel(_), _) => "Panel",
        (NodeKind::Leaf, Some(widget)) => widget.type_name(),
        (NodeKind::Leaf, None) => "Component",
    }
}

static_assertions::assert_impl_all!(ComponentTree: Send);

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::layout::BorderLayout;

    #[test]
    fn test_panel_defaults() {
        let mut tree = ComponentTree::new();
        let panel = tree.create_panel();
        let base = tree.component(panel).unwrap();
        assert_eq!(base.size(), DEFAULT_PANEL_SIZE);
        assert_eq!(base.preferred_size(), DEFAULT_PANEL_SIZE);
        assert_eq!(tree.kind(panel).unwrap(), ComponentKind::Panel);
        assert_eq!(tree.type_name(panel).unwrap(), "Panel");
    }

    #[test]
    fn test_parentless_size_follows_preferred() {
        let mut tree = ComponentTree::new();
        let leaf = tree.create_empty();
        tree.set_preferred_size(leaf, Size::new(30.0, 10.0)).unwrap();
        assert_eq!(tree.component(leaf).unwrap().size(), Size::new(30.0, 10.0));
    }

    #[test]
    fn test_destroy_removes_subtree() {
        let mut tree = ComponentTree::new();
        let root = tree.create_panel();
        let inner = tree.create_panel();
        let leaf = tree.create_empty();
        tree.add(inner, 0, leaf);
        tree.add(root, 0, inner);

        tree.destroy(inner).unwrap();
        assert!(!tree.contains(inner));
        assert!(!tree.contains(leaf));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.destroy(inner), Err(TreeError::InvalidComponent(inner)));
    }

    #[test]
    fn test_stale_id_reports_error() {
        let mut tree = ComponentTree::new();
        let leaf = tree.create_empty();
        tree.destroy(leaf).unwrap();
        assert_eq!(tree.set_visible(leaf, false), Err(TreeError::InvalidComponent(leaf)));
        assert!(tree.get(leaf).is_none());
    }

    #[test]
    fn test_focus_listener_fires_on_change_only() {
        let mut tree = ComponentTree::new();
        let leaf = tree.create_empty();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        tree.component(leaf).unwrap().add_focus_listener(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        tree.set_focus(leaf, true).unwrap();
        tree.set_focus(leaf, true).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        tree.set_focus(leaf, false).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clearing_panel_focus_clears_children() {
        let mut tree = ComponentTree::new();
        let panel = tree.create_panel();
        let leaf = tree.create_empty();
        tree.add(panel, 0, leaf);
        tree.set_focus(panel, true).unwrap();
        tree.set_focus(leaf, true).unwrap();

        tree.set_focus(panel, false).unwrap();
        assert!(!tree.component(panel).unwrap().has_focus());
        assert!(!tree.component(leaf).unwrap().has_focus());
    }

    #[test]
    fn test_grab_focus_counts_every_ancestor() {
        let mut tree = ComponentTree::new();
        let root = tree.create_panel();
        let inner = tree.create_panel();
        let leaf = tree.create_empty();
        tree.add(root, 0, inner);
        tree.add(inner, 0, leaf);

        tree.set_grab_focus(leaf, true).unwrap();
        assert!(tree.component(leaf).unwrap().has_focus());
        assert_eq!(tree.component(inner).unwrap().child_grab_focus_count(), 1);
        assert_eq!(tree.component(root).unwrap().child_grab_focus_count(), 1);

        // A panel with a grabbing descendant refuses to lose focus.
        tree.set_focus(inner, true).unwrap();
        tree.set_focus(inner, false).unwrap();
        assert!(tree.component(inner).unwrap().has_focus());
    }

    #[test]
    fn test_do_action_notifies_listeners() {
        let mut tree = ComponentTree::new();
        let leaf = tree.create_empty();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        tree.component(leaf).unwrap().add_action_listener(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        tree.do_action(leaf).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panel_changed_validates_and_reaches_children() {
        let mut tree = ComponentTree::new();
        let panel = tree.create_panel_with_layout(Box::new(BorderLayout));
        let leaf = tree.create_empty();
        tree.add(panel, BorderLayout::CENTER, leaf);
        tree.set_size(panel, Size::new(80.0, 40.0)).unwrap();

        let activations = Arc::new(AtomicUsize::new(0));
        let seen = activations.clone();
        tree.component(leaf).unwrap().add_panel_change_listener(move |(_, active)| {
            if *active {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        tree.panel_changed(panel, true).unwrap();
        assert_eq!(activations.load(Ordering::SeqCst), 1);
        assert_eq!(tree.component(leaf).unwrap().size(), Size::new(80.0, 40.0));
    }
}
