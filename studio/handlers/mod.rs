pub mod dataset;
pub mod events;
pub mod export;
pub mod network;
pub mod overlay;
pub mod page;
pub mod training;

use synaptix::{Notice, NoticeKind};

use crate::render::html_escape;

pub fn render_notices_html(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|n| {
            let cls = match n.kind {
                NoticeKind::Success => "notice-success",
                NoticeKind::Error   => "notice-error",
            };
            let role = match n.kind {
                NoticeKind::Success => "status",
                NoticeKind::Error   => "alert",
            };
            format!(r#"<div class="{}" role="{}">{}</div>"#, cls, role, html_escape(&n.text))
        })
        .collect()
}

/// `<a>` to the overlay explaining `topic`.
pub fn info_link(topic: synaptix::OverlayTopic) -> String {
    format!(r#"<a class="info" href="/overlay/{}">(?)</a>"#, topic.key())
}
