use std::io::Read;

use tiny_http::Request;

pub use synaptix::share::parse_query as parse_form;

/// Largest form body the studio reads.
const MAX_FORM_BYTES: u64 = 64 * 1024;

/// Reads and decodes an `application/x-www-form-urlencoded` body.
/// Unreadable or oversized bodies parse as empty.
pub fn read_form(request: &mut Request) -> Vec<(String, String)> {
    let mut body = String::new();
    let _ = request.as_reader().take(MAX_FORM_BYTES).read_to_string(&mut body);
    parse_form(&body)
}

/// Looks up a key in parsed form pairs, returning the value if found.
pub fn form_get<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_get_returns_first_match() {
        let pairs = parse_form("a=1&b=two+words&a=3");
        assert_eq!(form_get(&pairs, "a"), Some("1"));
        assert_eq!(form_get(&pairs, "b"), Some("two words"));
        assert_eq!(form_get(&pairs, "c"), None);
    }
}
