//! Email template previews.
//!
//! Templates use single-brace placeholders (`{full_name}`). A preview swaps
//! the known placeholders for fixed sample values; anything else is left as
//! written so typos stay visible.

/// Placeholder -> sample value used by previews.
pub const SAMPLE_VALUES: &[(&str, &str)] = &[
    ("full_name", "Test Kullanıcı"),
    ("email", "test@example.com"),
    ("code", "123456"),
    ("reset_link", "https://example.com/reset"),
    ("set_password_link", "https://example.com/set-password"),
    ("dashboard_url", "https://example.com/dashboard"),
    ("course_name", "Video Editörlüğü Ustalık Sınıfı"),
];

pub fn render_preview(html: &str) -> String {
    let mut out = html.to_string();
    for (key, value) in SAMPLE_VALUES {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

/// Placeholders used in `html` that previews cannot fill.
pub fn unknown_placeholders(html: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = html;
    while let Some(open) = rest.find('{') {
        let tail = &rest[open + 1..];
        let Some(close) = tail.find('}') else {
            break;
        };
        let name = &tail[..close];
        let is_ident = !name.is_empty()
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if is_ident
            && !SAMPLE_VALUES.iter().any(|(k, _)| *k == name)
            && !found.iter().any(|f: &String| f == name)
        {
            found.push(name.to_string());
        }
        rest = &tail[close + 1..];
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_placeholders_are_replaced_everywhere() {
        let html = "<p>Merhaba {full_name}</p><a href=\"{reset_link}\">{reset_link}</a>";
        assert_eq!(
            render_preview(html),
            "<p>Merhaba Test Kullanıcı</p><a href=\"https://example.com/reset\">https://example.com/reset</a>"
        );
    }

    #[test]
    fn unknown_placeholders_survive_preview() {
        let html = "Kod: {code} / {coupon_code}";
        assert_eq!(render_preview(html), "Kod: 123456 / {coupon_code}");
        assert_eq!(unknown_placeholders(html), vec!["coupon_code"]);
    }

    #[test]
    fn css_blocks_are_not_placeholders() {
        let html = "<style>p { color: red; }</style>{email}";
        assert!(unknown_placeholders(html).is_empty());
    }
}
