//! Logging and debugging facilities for Trellis.
//!
//! This module provides:
//! - Target and span names used with the `tracing` crate
//! - Debug visualization for component trees
//!
//! # Tracing Integration
//!
//! Trellis uses the `tracing` crate for instrumentation. To see logs, install a
//! subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("trellis::dispatch=trace")
//!         .init();
//! }
//! ```
//!
//! # Debug Visualization
//!
//! Any hierarchy implementing [`DebugTree`] can be rendered with [`TreeDebug`]:
//!
//! ```ignore
//! use trellis_core::logging::{TreeDebug, TreeFormatOptions};
//!
//! let dump = TreeDebug::with_options(TreeFormatOptions::minimal()).format_subtree(&tree, root);
//! tracing::debug!(target: "trellis::tree", "\n{dump}");
//! ```

use std::fmt::Write as FmtWrite;

/// Span names used throughout Trellis for tracing.
pub mod span_names {
    /// Signal emission span.
    pub const SIGNAL: &str = "trellis::signal";
    /// Layout pass span.
    pub const VALIDATE: &str = "trellis::validate";
    /// Mouse dispatch span.
    pub const MOUSE_DISPATCH: &str = "trellis::mouse_dispatch";
    /// Keyboard dispatch span.
    pub const KEY_DISPATCH: &str = "trellis::key_dispatch";
    /// Per-frame update span.
    pub const FRAME_UPDATE: &str = "trellis::frame_update";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "trellis_core";
    /// Signal/listener system target.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// Component store target (registration, ownership).
    pub const TREE: &str = "trellis::tree";
    /// Layout pass target.
    pub const LAYOUT: &str = "trellis::layout";
    /// Mouse and keyboard routing target.
    pub const DISPATCH: &str = "trellis::dispatch";
    /// Focus and priority changes.
    pub const FOCUS: &str = "trellis::focus";
    /// Keyboard traversal target.
    pub const TRAVERSAL: &str = "trellis::traversal";
    /// Frame and window glue target.
    pub const FRAME: &str = "trellis::frame";
    /// System clipboard access.
    pub const CLIPBOARD: &str = "trellis::clipboard";
    /// Rendering collaborator target.
    pub const RENDER: &str = "trellis_render";
}

/// A hierarchy that can be printed by [`TreeDebug`].
pub trait DebugTree {
    /// Node identifier.
    type Id: Copy + std::fmt::Debug;

    /// Short human-readable label for a node, or `None` if the id is stale.
    fn label(&self, id: Self::Id) -> Option<String>;

    /// Type or kind name shown when [`TreeFormatOptions::show_types`] is set.
    fn kind_name(&self, id: Self::Id) -> Option<&'static str>;

    /// Extra `key=value` details shown when
    /// [`TreeFormatOptions::show_details`] is set.
    fn details(&self, _id: Self::Id) -> Vec<String> {
        Vec::new()
    }

    /// Children in draw order.
    fn children(&self, id: Self::Id) -> Vec<Self::Id>;
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact dash-prefixed representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node ids.
    pub show_ids: bool,
    /// Whether to show kind names.
    pub show_types: bool,
    /// Whether to show per-node details (geometry, flags).
    pub show_details: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_types: true,
            show_details: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_details: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            show_details: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing trees.
#[derive(Debug, Clone, Default)]
pub struct TreeDebug {
    options: TreeFormatOptions,
}

impl TreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format a subtree starting from `root`.
    ///
    /// Stale ids are skipped silently.
    pub fn format_subtree<T: DebugTree>(&self, tree: &T, root: T::Id) -> String {
        let mut output = String::new();
        self.format_subtree_into(tree, root, 0, true, &mut output);
        output
    }

    fn format_subtree_into<T: DebugTree>(
        &self,
        tree: &T,
        id: T::Id,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }
        let Some(label) = tree.label(id) else {
            return;
        };

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(if label.is_empty() { "(unnamed)" } else { &label });

        if self.options.show_ids {
            let _ = write!(output, " [{:?}]", id);
        }
        if self.options.show_types {
            if let Some(kind) = tree.kind_name(id) {
                let _ = write!(output, " ({})", kind);
            }
        }
        output.push('\n');

        if self.options.show_details {
            let details = tree.details(id);
            if !details.is_empty() {
                let detail_prefix = self.build_detail_prefix(depth);
                for detail in details {
                    let _ = writeln!(output, "{}  .{}", detail_prefix, detail);
                }
            }
        }

        let children = tree.children(id);
        let child_count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.format_subtree_into(tree, child, depth + 1, i + 1 == child_count, output);
        }
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.extend(std::iter::repeat_n(' ', self.options.indent_size));
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }

    fn build_detail_prefix(&self, depth: usize) -> String {
        let branch = match self.options.style {
            TreeStyle::Ascii => "|",
            TreeStyle::Unicode => "\u{2502}",
            TreeStyle::Compact => "",
        };
        let mut prefix = String::new();
        for _ in 0..depth {
            prefix.push_str(branch);
            prefix.extend(std::iter::repeat_n(' ', self.options.indent_size));
        }
        prefix
    }
}
