/// Holds the current text of the username box.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    value: String,
}

impl InputController {
    #[must_use]
    pub fn new(default_value: impl Into<String>) -> Self {
        Self {
            value: default_value.into(),
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value with the raw input. Returns whether it changed,
    /// which is what downstream reactions key on.
    pub fn on_input(&mut self, raw: &str) -> bool {
        if self.value == raw {
            return false;
        }
        raw.clone_into(&mut self.value);
        true
    }
}
