//! Server-rendered HTML pages.
//!
//! Pages are plain strings assembled with `format!`; every value that came
//! from a user or the database goes through [`escape`] first.

use axum::{http::StatusCode, response::Html};

mod seeds;

pub use seeds::{add_form, confirm_delete, report, status, update_form};

const STYLE: &str = "body{font-family:sans-serif;margin:2rem auto;max-width:60rem}\
nav a{margin-right:1rem}table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:.4rem;text-align:left}\
.error{color:#a00;font-weight:bold}label{display:block;margin:.5rem 0}";

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wraps `body` (already escaped HTML) in the shared layout.
pub fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Seed Inventory</title>
<style>{style}</style>
</head>
<body>
<nav><a href="/">Home</a><a href="/add">Add Seed</a><a href="/report">Report</a><a href="/status">Status</a></nav>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        body = body,
    ))
}

pub fn home() -> Html<String> {
    page(
        "Seed Inventory",
        r#"<p>Track seed stock: record new lots, keep quantities and suppliers current, and see what is running low or has expired.</p>
<ul>
<li><a href="/add">Add a seed</a></li>
<li><a href="/report">View the inventory report</a></li>
<li><a href="/status">View the status overview</a></li>
</ul>"#,
    )
}

pub fn error_page(status: StatusCode, message: &str, request_id: Option<&str>) -> Html<String> {
    let title = status.canonical_reason().unwrap_or("Error");
    let reference = request_id
        .map(|rid| format!("<p><small>Request id: <code>{}</code></small></p>", escape(rid)))
        .unwrap_or_default();

    page(
        title,
        &format!(
            r#"<p class="error">{message}</p>
{reference}
<p><a href="/report">Back to the report</a></p>"#,
            message = escape(message),
            reference = reference,
        ),
    )
}
