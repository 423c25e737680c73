//! Tree dumps for debugging.

use trellis_core::logging::{DebugTree, TreeDebug, TreeFormatOptions};

use super::ComponentTree;
use crate::component::ComponentId;
use crate::error::TreeResult;

impl DebugTree for ComponentTree {
    type Id = ComponentId;

    fn label(&self, id: ComponentId) -> Option<String> {
        self.get(id).map(|base| base.name().unwrap_or_default().to_owned())
    }

    fn kind_name(&self, id: ComponentId) -> Option<&'static str> {
        self.type_name(id).ok()
    }

    fn details(&self, id: ComponentId) -> Vec<String> {
        let Some(base) = self.get(id) else {
            return Vec::new();
        };
        let bounds = base.bounds();
        let mut details = vec![format!(
            "bounds=({}, {}, {}x{})",
            bounds.left(),
            bounds.bottom(),
            bounds.width(),
            bounds.height()
        )];
        if base.layout_index != 0 {
            details.push(format!("layout_index={}", base.layout_index));
        }
        if !base.visible {
            details.push("hidden".to_owned());
        }
        if base.focus {
            details.push("focus".to_owned());
        }
        if base.grab_focus || base.child_grab_focus > 0 {
            details.push(format!("grab={} child_grab={}", base.grab_focus, base.child_grab_focus));
        }
        if let Some(priority) = self.priority(id) {
            details.push(format!("priority={priority:?}"));
        }
        details
    }

    fn children(&self, id: ComponentId) -> Vec<ComponentId> {
        ComponentTree::children(self, id).to_vec()
    }
}

impl ComponentTree {
    /// Multi-line dump of the subtree at `id`, with geometry and flags.
    pub fn dump(&self, id: ComponentId) -> TreeResult<String> {
        self.dump_with(id, TreeFormatOptions::detailed())
    }

    /// Dump the subtree at `id` with custom formatting.
    pub fn dump_with(&self, id: ComponentId, options: TreeFormatOptions) -> TreeResult<String> {
        self.component(id)?;
        Ok(TreeDebug::with_options(options).format_subtree(self, id))
    }
}
