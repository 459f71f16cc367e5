use super::PanelError;

/// Free text typed into a panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptInput {
    text: String,
}

impl PromptInput {
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The raw text, or a validation error carrying `empty_message` when it
    /// is blank. Whitespace is only inspected, never stripped.
    pub fn validated(&self, empty_message: &str) -> Result<&str, PanelError> {
        if self.text.trim().is_empty() {
            return Err(PanelError::Validation(empty_message.to_string()));
        }
        Ok(&self.text)
    }
}
