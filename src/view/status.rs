/// State of the single status bar
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Hidden,
    Info(String),
    Error(String),
}

impl Status {
    /// Informational message; empty text hides the bar
    pub fn info(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Status::Hidden
        } else {
            Status::Info(text)
        }
    }

    /// Error message; empty text hides the bar
    pub fn error(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Status::Hidden
        } else {
            Status::Error(text)
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Status::Hidden)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Status::Hidden => None,
            Status::Info(text) | Status::Error(text) => Some(text),
        }
    }

    /// CSS class of the bar for the visible modes
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Status::Hidden => None,
            Status::Info(_) => Some("status-bar info"),
            Status::Error(_) => Some("status-bar error"),
        }
    }
}
