use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind { Success, Error }

/// A one-shot message for the user, shown on the next render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Success, text: text.into() }
    }
    pub fn error(text: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Error, text: text.into() }
    }
}
