//! Status Line

use serde::Serialize;

pub const STATUS_CLASS: &str = "alert alert-info";

#[derive(Debug, Clone, Serialize)]
pub struct StatusLine {
    pub text: String,
    pub class: &'static str,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            text: "Waiting for feed...".to_string(),
            class: STATUS_CLASS,
        }
    }
}

impl StatusLine {
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.class = STATUS_CLASS;
    }
}
