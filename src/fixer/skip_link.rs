// SPDX-License-Identifier: PMPL-1.0-or-later
//! Skip-to-content link emitted at the top of `<body>`
//!
//! Not a tree rewrite: the page renderer prints this markup once, right
//! after `<body>`, and includes [`SKIP_LINK_CSS`] in the page styles.

/// Label used when none is configured
pub const DEFAULT_SKIP_LABEL: &str = "Skip to content";

/// Fragment the link jumps to
pub const SKIP_TARGET: &str = "#content";

/// Visually hidden until focused
pub const SKIP_LINK_CSS: &str = r#".wpag-skip-link {
    position: absolute;
    top: -100%;
    left: 0;
    z-index: 999999;
    padding: 8px 16px;
    background: #000;
    color: #fff;
    text-decoration: none;
    font-size: 14px;
    line-height: 1.5;
    clip: rect(1px, 1px, 1px, 1px);
    clip-path: inset(50%);
    overflow: hidden;
    white-space: nowrap;
    width: 1px;
    height: 1px;
}
.wpag-skip-link:focus {
    position: fixed;
    top: 6px;
    left: 6px;
    clip: auto;
    clip-path: none;
    width: auto;
    height: auto;
    overflow: visible;
    outline: 2px solid #0073aa;
    outline-offset: 2px;
    border-radius: 3px;
}
"#;

/// Anchor markup for the skip link, with `label` HTML-escaped
pub fn skip_link_markup(label: &str) -> String {
    format!(
        "<a class=\"wpag-skip-link screen-reader-text\" href=\"{}\">{}</a>",
        SKIP_TARGET,
        escape_html(label)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}
