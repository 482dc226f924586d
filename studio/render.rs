/// Central template renderer for the Synaptix studio.
///
/// The studio uses a single HTML template (`studio/assets/studio.html`) with
/// placeholder tokens like `{{TOKEN}}`. Global placeholders (active tab,
/// training flag) are resolved here; the caller's closure fills the panel
/// placeholders, and anything left over is blanked.

const TEMPLATE: &str = include_str!("assets/studio.html");

/// Which side-panel tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Network,
    Dataset,
    Training,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Network, Tab::Dataset, Tab::Training];

    pub fn key(&self) -> &'static str {
        match self {
            Tab::Network  => "network",
            Tab::Dataset  => "dataset",
            Tab::Training => "training",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Network  => "Network",
            Tab::Dataset  => "Dataset",
            Tab::Training => "Training",
        }
    }

    /// Unknown or missing keys fall back to the network tab.
    pub fn from_key(key: Option<&str>) -> Tab {
        Tab::ALL
            .into_iter()
            .find(|t| Some(t.key()) == key)
            .unwrap_or(Tab::Network)
    }
}

/// Renders the full studio page.
///
/// # Arguments
/// - `tab`              — active side-panel tab
/// - `training_running` — whether the browser should open the SSE stream
/// - `fill`             — closure that fills page-specific placeholders
pub fn render_page<F>(tab: Tab, training_running: bool, fill: F) -> String
where
    F: FnOnce(String) -> String,
{
    let mut html = TEMPLATE.to_owned();

    html = html.replace("{{TAB_LINKS}}", &tab_links(tab));
    html = html.replace("{{ACTIVE_TAB}}", tab.key());
    html = html.replace("{{TRAINING_RUNNING}}", if training_running { "true" } else { "false" });
    for t in Tab::ALL {
        let token = format!("{{{{HIDE_{}}}}}", t.key().to_uppercase());
        html = html.replace(&token, if t == tab { "" } else { "hidden" });
    }

    html = fill(html);
    blank_remaining(html)
}

fn tab_links(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|t| {
            let current = if *t == active { " aria-current=\"page\"" } else { "" };
            format!(r#"<a href="/?tab={}"{}>{}</a>"#, t.key(), current, t.label())
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Replaces any `{{TOKEN}}` that wasn't substituted with an empty string.
fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        if let Some(end) = html[start..].find("}}") {
            let abs_end = start + end + 2;
            html.replace_range(start..abs_end, "");
        } else {
            break;
        }
    }
    html
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tab_falls_back_to_network() {
        assert_eq!(Tab::from_key(Some("dataset")), Tab::Dataset);
        assert_eq!(Tab::from_key(Some("bogus")), Tab::Network);
        assert_eq!(Tab::from_key(None), Tab::Network);
    }

    #[test]
    fn leftover_tokens_are_blanked() {
        assert_eq!(blank_remaining("a{{X}}b{{Y_Z}}c".to_owned()), "abc");
        assert_eq!(blank_remaining("open {{ never closed".to_owned()), "open {{ never closed");
    }

    #[test]
    fn page_hides_inactive_panels() {
        let html = render_page(Tab::Training, true, |t| t);
        assert!(html.contains("id=\"panel-training\" "));
        assert!(html.contains("id=\"panel-network\" hidden"));
        assert!(html.contains("const TRAINING_RUNNING = true;"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(html_escape("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
