/// Supplies a string when the text or emoji tool is pressed. `None` or an
/// empty answer means the prompt was cancelled.
pub trait TextPrompt {
    fn ask(&mut self, title: &str, message: &str) -> Option<String>;
}

/// A prompt that always cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl TextPrompt for NoPrompt {
    fn ask(&mut self, _title: &str, _message: &str) -> Option<String> {
        None
    }
}

/// A pre-filled answer, consumed on first use.
impl TextPrompt for Option<String> {
    fn ask(&mut self, _title: &str, _message: &str) -> Option<String> {
        self.take()
    }
}
