//! Keyboard focus traversal.
//!
//! A [`TraversalGroup`] is an ordered list of components that Tab (and
//! optionally the arrow keys) cycles focus through. It is independent of the
//! containment tree: members are plain [`ComponentId`]s added explicitly, and
//! the group reads and changes component state through a [`TraversalAccess`]
//! implementation supplied by the caller.
//!
//! # Navigation
//!
//! | Key              | Effect                                   | Enabled by                |
//! |------------------|------------------------------------------|---------------------------|
//! | Tab              | Next member                              | `tab` (default on)        |
//! | Shift+Tab        | Previous member                          | `tab` (default on)        |
//! | Up / Down        | Previous / next member                   | `vertical_arrows`         |
//! | Left / Right     | Previous / next member                   | `horizontal_arrows`       |
//! | Enter / KP Enter | Fire the focused member's action         | always                    |
//!
//! Hidden members are skipped by every step.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use trellis_render::Rect;

use crate::component::ComponentId;
use crate::events::{Key, KeyEvent};

/// Which keys drive a traversal group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    pub tab: bool,
    pub vertical_arrows: bool,
    pub horizontal_arrows: bool,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            tab: true,
            vertical_arrows: false,
            horizontal_arrows: false,
        }
    }
}

/// The component state a traversal group reads and writes.
///
/// Implemented by the component tree; tests provide a fake.
pub trait TraversalAccess {
    fn is_visible(&self, id: ComponentId) -> bool;

    fn has_focus(&self, id: ComponentId) -> bool;

    /// Bounds in the parent's coordinate space, `None` for a stale id.
    fn bounds(&self, id: ComponentId) -> Option<Rect>;

    fn set_focus(&mut self, id: ComponentId, focus: bool);

    fn do_action(&mut self, id: ComponentId);
}

/// An ordered set of components participating in keyboard navigation.
#[derive(Debug, Clone, Default)]
pub struct TraversalGroup {
    members: Vec<ComponentId>,
    last_focus: Option<usize>,
    tab: bool,
    vertical_arrows: bool,
    horizontal_arrows: bool,
}

impl TraversalGroup {
    /// Create a group navigated by Tab only.
    pub fn new() -> Self {
        Self::with_config(TraversalConfig::default())
    }

    pub fn with_config(config: TraversalConfig) -> Self {
        Self {
            members: Vec::new(),
            last_focus: None,
            tab: config.tab,
            vertical_arrows: config.vertical_arrows,
            horizontal_arrows: config.horizontal_arrows,
        }
    }

    /// Append a member. Adding the same component twice is ignored.
    pub fn add(&mut self, id: ComponentId) {
        if !self.members.contains(&id) {
            self.members.push(id);
        }
    }

    /// Remove a member, keeping the remembered focus on the same component.
    ///
    /// If the removed member was the remembered one, the memory moves to the
    /// member before it.
    pub fn remove(&mut self, id: ComponentId) -> bool {
        let Some(index) = self.members.iter().position(|&member| member == id) else {
            return false;
        };
        self.members.remove(index);
        self.last_focus = match self.last_focus {
            _ if self.members.is_empty() => None,
            Some(last) if index < last => Some(last - 1),
            Some(last) if index == last => Some(last.saturating_sub(1)),
            other => other,
        };
        true
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.last_focus = None;
    }

    #[inline]
    pub fn members(&self) -> &[ComponentId] {
        &self.members
    }

    #[inline]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.members.contains(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Index of the member that last received focus from this group.
    #[inline]
    pub fn last_focus_index(&self) -> Option<usize> {
        self.last_focus
    }

    pub fn is_tab_enabled(&self) -> bool {
        self.tab
    }

    pub fn set_tab_enabled(&mut self, enabled: bool) {
        self.tab = enabled;
    }

    pub fn is_vertical_arrows_enabled(&self) -> bool {
        self.vertical_arrows
    }

    pub fn set_vertical_arrows_enabled(&mut self, enabled: bool) {
        self.vertical_arrows = enabled;
    }

    pub fn is_horizontal_arrows_enabled(&self) -> bool {
        self.horizontal_arrows
    }

    pub fn set_horizontal_arrows_enabled(&mut self, enabled: bool) {
        self.horizontal_arrows = enabled;
    }

    /// Move focus to the next (or previous) visible member, wrapping.
    ///
    /// Starts from the focused member, or else from the one this group last
    /// focused. With neither, the first visible member gets focus. Does
    /// nothing when no member is visible.
    pub fn change_to_next(&mut self, access: &mut impl TraversalAccess, forward: bool) {
        let len = self.members.len();
        let Some(first_visible) = self.members.iter().position(|&id| access.is_visible(id)) else {
            return;
        };

        let start = self
            .members
            .iter()
            .position(|&id| access.is_visible(id) && access.has_focus(id))
            .or(self.last_focus.filter(|&index| index < len));

        let target = match start {
            None => first_visible,
            Some(start) => (1..=len)
                .map(|step| {
                    if forward {
                        (start + step) % len
                    } else {
                        (start + len - step) % len
                    }
                })
                .find(|&index| access.is_visible(self.members[index]))
                .unwrap_or(first_visible),
        };

        let target_id = self.members[target];
        for &id in &self.members {
            if id != target_id {
                access.set_focus(id, false);
            }
        }
        access.set_focus(target_id, true);
        self.last_focus = Some(target);
        tracing::trace!(
            target: trellis_core::logging::targets::TRAVERSAL,
            ?target_id,
            index = target,
            forward,
            "traversal focus moved"
        );
    }

    /// Whether `event` is a focus-moving key under the current settings.
    ///
    /// Such keys reach the group even after a focused child consumed them.
    pub fn navigates(&self, event: &KeyEvent) -> bool {
        let KeyEvent::KeyDown { key, .. } = event else {
            return false;
        };
        match key {
            Key::Tab => self.tab,
            Key::ArrowLeft | Key::ArrowRight => self.horizontal_arrows,
            Key::ArrowUp | Key::ArrowDown => self.vertical_arrows,
            _ => false,
        }
    }

    /// Process navigation keys. Returns `true` if the event was consumed.
    pub fn handle_keyboard(&mut self, access: &mut impl TraversalAccess, event: &KeyEvent) -> bool {
        let KeyEvent::KeyDown { key, modifiers, .. } = event else {
            return false;
        };
        match key {
            Key::Tab if self.tab => {
                self.change_to_next(access, !modifiers.shift);
                true
            }
            Key::ArrowLeft | Key::ArrowRight if self.horizontal_arrows => {
                self.change_to_next(access, *key == Key::ArrowRight);
                true
            }
            Key::ArrowUp | Key::ArrowDown if self.vertical_arrows => {
                self.change_to_next(access, *key == Key::ArrowDown);
                true
            }
            Key::Enter | Key::NumpadEnter => {
                let focused = self
                    .members
                    .iter()
                    .copied()
                    .find(|&id| access.has_focus(id) && access.is_visible(id));
                match focused {
                    Some(id) => {
                        access.do_action(id);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    /// Reorder members top-to-bottom, then left-to-right.
    ///
    /// "Top" is the larger y in bottom-left space. Ties keep their order.
    pub fn sort(&mut self, access: &impl TraversalAccess) {
        self.sort_by(access, |a, b| {
            b.top()
                .total_cmp(&a.top())
                .then_with(|| a.left().total_cmp(&b.left()))
        });
    }

    /// Reorder members left-to-right, then top-to-bottom.
    pub fn horizontal_sort(&mut self, access: &impl TraversalAccess) {
        self.sort_by(access, |a, b| {
            a.left()
                .total_cmp(&b.left())
                .then_with(|| b.top().total_cmp(&a.top()))
        });
    }

    fn sort_by(&mut self, access: &impl TraversalAccess, compare: impl Fn(&Rect, &Rect) -> Ordering) {
        let remembered = self.last_focus.and_then(|index| self.members.get(index).copied());
        let mut keyed: Vec<(ComponentId, Rect)> = self
            .members
            .iter()
            .map(|&id| (id, access.bounds(id).unwrap_or(Rect::ZERO)))
            .collect();
        keyed.sort_by(|(_, a), (_, b)| compare(a, b));
        self.members = keyed.into_iter().map(|(id, _)| id).collect();
        self.last_focus = remembered.and_then(|id| self.members.iter().position(|&member| member == id));
    }
}
