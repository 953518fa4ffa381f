//! Bold / italic / underline toolbar.
//!
//! Button state is never stored: after every formatting click, mouse-up,
//! key-up or click in the region it is re-derived from what the browser
//! reports for the current caret or selection.

use web_sys::{HtmlDocument, HtmlElement};

use crate::config::ElementIds;

/// Class marking a toolbar button as active.
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
}

impl FormatCommand {
    pub const ALL: [FormatCommand; 3] = [
        FormatCommand::Bold,
        FormatCommand::Italic,
        FormatCommand::Underline,
    ];

    /// Name understood by `execCommand` / `queryCommandState`.
    pub fn command_name(self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::Underline => "underline",
        }
    }

    pub fn button_id(self, ids: &ElementIds) -> &str {
        match self {
            FormatCommand::Bold => &ids.bold_button,
            FormatCommand::Italic => &ids.italic_button,
            FormatCommand::Underline => &ids.underline_button,
        }
    }
}

/// Active state of the three controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolbarState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl ToolbarState {
    /// Derive from a command-state query.
    pub fn derive<F>(mut query: F) -> Self
    where
        F: FnMut(FormatCommand) -> bool,
    {
        Self {
            bold: query(FormatCommand::Bold),
            italic: query(FormatCommand::Italic),
            underline: query(FormatCommand::Underline),
        }
    }

    pub fn is_active(&self, command: FormatCommand) -> bool {
        match command {
            FormatCommand::Bold => self.bold,
            FormatCommand::Italic => self.italic,
            FormatCommand::Underline => self.underline,
        }
    }

    /// Read the state from the document.
    pub fn query(document: &HtmlDocument) -> Self {
        Self::derive(|command| {
            document
                .query_command_state(command.command_name())
                .unwrap_or(false)
        })
    }
}

/// The toolbar buttons that exist on the page.
pub struct Toolbar {
    buttons: Vec<(FormatCommand, HtmlElement)>,
}

impl Toolbar {
    pub fn new(buttons: Vec<(FormatCommand, HtmlElement)>) -> Self {
        Self { buttons }
    }

    pub fn buttons(&self) -> &[(FormatCommand, HtmlElement)] {
        &self.buttons
    }

    /// Apply a formatting command to the current selection.
    pub fn apply(document: &HtmlDocument, command: FormatCommand) {
        if let Err(e) = document.exec_command(command.command_name()) {
            log::warn!("execCommand({}) failed: {:?}", command.command_name(), e);
        }
    }

    /// Re-derive and render the active markers.
    pub fn refresh(&self, document: &HtmlDocument) -> ToolbarState {
        let state = ToolbarState::query(document);
        for (command, button) in &self.buttons {
            let _ = button
                .class_list()
                .toggle_with_force(ACTIVE_CLASS, state.is_active(*command));
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_reflects_query_exactly() {
        let state = ToolbarState::derive(|c| c == FormatCommand::Italic);
        assert_eq!(state, ToolbarState { bold: false, italic: true, underline: false });

        let all = ToolbarState::derive(|_| true);
        for command in FormatCommand::ALL {
            assert!(all.is_active(command));
        }
    }

    #[test]
    fn test_derive_queries_each_command_once() {
        let mut asked = Vec::new();
        ToolbarState::derive(|c| {
            asked.push(c.command_name());
            false
        });
        assert_eq!(asked, vec!["bold", "italic", "underline"]);
    }

    #[test]
    fn test_button_ids() {
        let ids = ElementIds::default();
        assert_eq!(FormatCommand::Bold.button_id(&ids), "boldBtn");
        assert_eq!(FormatCommand::Underline.button_id(&ids), "underlineBtn");
    }
}
