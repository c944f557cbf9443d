use crate::views::form::FormField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Text,
    Number,
}

impl InputMode {
    pub fn accepts(self, c: char) -> bool {
        match self {
            Self::Text => true,
            Self::Number => c.is_ascii_digit() || c == '.' || c == '-',
        }
    }
}

/// Everything needed to render one labeled input and its inline error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput<'a> {
    pub field: FormField,
    pub label: &'static str,
    pub id: &'static str,
    pub mode: InputMode,
    pub value: &'a str,
    pub error: Option<&'a str>,
}

impl FormInput<'_> {
    /// Drops characters the input mode does not accept.
    pub fn sanitize(&self, raw: &str) -> String {
        raw.chars().filter(|c| self.mode.accepts(*c)).collect()
    }
}
