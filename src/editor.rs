//! Read-only composition over an embeddable rich diagram editor.
//!
//! The heavy editor component is an externally-injected capability: this
//! module only assembles the locked-down option set (view-only, zen mode,
//! no chrome) and delegates. There is no rendering logic here.

use crate::element::DiagramElement;

/// Per-viewer chrome switches of the embedded editor's canvas menu.
/// Everything defaults to off for read-only display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CanvasActions {
    pub change_background: bool,
    pub clear_canvas: bool,
    pub export: bool,
    pub load_scene: bool,
    pub save_to_file: bool,
    pub theme_toggle: bool,
    pub save_as_image: bool,
}

/// Editing tools of the embedded editor. Off for read-only display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorTools {
    pub image: bool,
    pub text: bool,
}

/// Configuration handed to the embedded editor.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerOptions {
    pub width: u32,
    pub height: u32,
    /// Scene background; white by default.
    pub background_color: String,
    /// Non-editable display mode.
    pub view_mode: bool,
    /// Minimal-UI mode, hides most of the editor chrome.
    pub zen_mode: bool,
    pub grid: bool,
    pub canvas_actions: CanvasActions,
    pub tools: EditorTools,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            width: crate::canvas::DEFAULT_WIDTH,
            height: crate::canvas::DEFAULT_HEIGHT,
            background_color: "#ffffff".to_string(),
            view_mode: true,
            zen_mode: true,
            grid: false,
            canvas_actions: CanvasActions::default(),
            tools: EditorTools::default(),
        }
    }
}

impl ViewerOptions {
    /// Size and background overrides on top of the read-only defaults.
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Force the read-only invariants back on, whatever the caller set.
    /// Size and background survive; everything interactive does not.
    fn locked(mut self) -> Self {
        self.view_mode = true;
        self.zen_mode = true;
        self.grid = false;
        self.canvas_actions = CanvasActions::default();
        self.tools = EditorTools::default();
        self
    }
}

/// An embeddable diagram editor supplied by the host application.
pub trait EmbeddedEditor {
    /// Whatever view handle the host's UI layer works with.
    type View;

    /// Mount the editor over the given elements and options.
    fn render(&self, elements: &[DiagramElement], options: &ViewerOptions) -> Self::View;
}

/// Display elements through the embedded editor in read-only mode.
///
/// Pure pass-through configuration: the options are locked down to the
/// non-editable, chrome-free set before delegation, so a caller-supplied
/// options value can only influence size and background.
pub fn render_read_only<E: EmbeddedEditor>(
    editor: &E,
    elements: &[DiagramElement],
    options: ViewerOptions,
) -> E::View {
    editor.render(elements, &options.locked())
}
