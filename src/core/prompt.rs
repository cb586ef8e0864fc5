//! Line buffer behind the `>` prompt.

/// Accepts printable ASCII only. Edits happen at the end of the line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PromptBuffer {
    text: String,
}

impl PromptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns false (and leaves the buffer alone) for non-printable input.
    pub fn push(&mut self, ch: char) -> bool {
        if !matches!(ch, ' '..='~') {
            return false;
        }
        self.text.push(ch);
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Take the line for submission. `None` when there is nothing to submit.
    pub fn take(&mut self) -> Option<String> {
        (!self.text.is_empty()).then(|| std::mem::take(&mut self.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_rejects_non_printable() {
        let mut prompt = PromptBuffer::new();
        assert!(prompt.push('a'));
        assert!(!prompt.push('\t'));
        assert!(!prompt.push('é'));
        assert!(!prompt.push('\u{7f}'));
        assert_eq!(prompt.as_str(), "a");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut prompt = PromptBuffer::new();
        assert!(!prompt.backspace());
        prompt.push('x');
        assert!(prompt.backspace());
        assert!(prompt.is_empty());
    }

    #[test]
    fn test_take_clears() {
        let mut prompt = PromptBuffer::new();
        assert_eq!(prompt.take(), None);

        prompt.push('h');
        prompt.push('i');
        assert_eq!(prompt.take().as_deref(), Some("hi"));
        assert!(prompt.is_empty());
    }
}
