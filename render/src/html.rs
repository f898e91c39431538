//! HTML page shell and escaping shared by the detail templates.

/// Stylesheet embedded in every detail page.
const STYLE: &str = r#"body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2rem; }
table { border-collapse: collapse; margin-bottom: 2rem; }
th, td { border: 1px solid #d0d7de; padding: 0.25rem 0.75rem; text-align: left; }
td.elapsed { text-align: right; font-variant-numeric: tabular-nums; }
.status-ERROR, .status-FAIL, .status-FAIL_BUILD { color: #cf222e; }
.status-PASS { color: #1a7f37; }
.status-SKIP, .status-MUTE { color: #6e7781; }
.timeout { font-weight: bold; }
nav.status-index a { margin-right: 1rem; }"#;

/// Wraps `body_html` in a standalone HTML document.
pub fn render_page(title: &str, body_html: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
{style}
</style>
</head>
<body>
<main id="main-content">
{body_html}
</main>
</body>
</html>
"##,
        title = escape_html(title),
        style = STYLE,
        body_html = body_html,
    )
}

/// Escapes HTML special characters in a string.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
