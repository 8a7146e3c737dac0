use axum::response::Html;
use std::fmt::Write;

use super::{escape, page};
use crate::handlers::forms::SeedForm;
use crate::models::{Seed, StatusSummary, TRACKED_STATUSES};

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|msg| format!(r#"<p class="error">{}</p>"#, escape(msg)))
        .unwrap_or_default()
}

/// Suggestions for the free-text status input.
fn status_options() -> String {
    let mut out = String::from(r#"<datalist id="statuses">"#);
    for status in TRACKED_STATUSES {
        let _ = write!(out, r#"<option value="{}">"#, escape(status));
    }
    out.push_str("</datalist>");
    out
}

fn mutable_fields(form: &SeedForm) -> String {
    format!(
        r#"<label>Type <input name="seed_type" value="{seed_type}" required></label>
<label>Quantity <input name="quantity" type="number" min="0" step="1" value="{quantity}" required></label>
<label>Supplier <input name="supplier" value="{supplier}" required></label>
<label>Status <input name="status" list="statuses" value="{status}" required></label>
{options}"#,
        seed_type = escape(&form.seed_type),
        quantity = escape(&form.quantity),
        supplier = escape(&form.supplier),
        status = escape(&form.status),
        options = status_options(),
    )
}

pub fn add_form(form: &SeedForm, error: Option<&str>) -> Html<String> {
    page(
        "Add Seed",
        &format!(
            r#"{error}
<form method="post" action="/add">
<label>Name <input name="seed_name" value="{name}" required></label>
{fields}
<button type="submit">Add Seed</button>
</form>"#,
            error = error_banner(error),
            name = escape(&form.seed_name),
            fields = mutable_fields(form),
        ),
    )
}

/// Name and display id are shown read-only; they cannot be changed here.
pub fn update_form(seed: &Seed, form: &SeedForm, error: Option<&str>) -> Html<String> {
    page(
        &format!("Update {}", seed.display_id),
        &format!(
            r#"{error}
<p>Seed <strong>{display_id}</strong>: {name}</p>
<form method="post" action="/update/{id}">
{fields}
<button type="submit">Save</button>
</form>"#,
            error = error_banner(error),
            display_id = escape(&seed.display_id),
            name = escape(&seed.name),
            id = seed.internal_id,
            fields = mutable_fields(form),
        ),
    )
}

pub fn confirm_delete(seed: &Seed) -> Html<String> {
    page(
        &format!("Delete {}", seed.display_id),
        &format!(
            r#"<p>Delete <strong>{display_id}</strong> ({name}, {quantity} from {supplier})? This cannot be undone.</p>
<form method="post" action="/delete/{id}">
<button type="submit">Delete</button>
<a href="/report">Cancel</a>
</form>"#,
            display_id = escape(&seed.display_id),
            name = escape(&seed.name),
            quantity = seed.quantity,
            supplier = escape(&seed.supplier),
            id = seed.internal_id,
        ),
    )
}

pub fn report(seeds: &[Seed]) -> Html<String> {
    let mut body = String::new();
    if seeds.is_empty() {
        body.push_str(r#"<p>No seeds recorded yet. <a href="/add">Add one</a>.</p>"#);
        return page("Seed Report", &body);
    }

    body.push_str(
        "<table>\n<thead><tr><th>ID</th><th>Name</th><th>Type</th><th>Quantity</th>\
<th>Supplier</th><th>Status</th><th>Date Added</th><th></th></tr></thead>\n<tbody>\n",
    );
    for seed in seeds {
        let _ = writeln!(
            body,
            r#"<tr><td>{display_id}</td><td>{name}</td><td>{seed_type}</td><td>{quantity}</td><td>{supplier}</td><td>{status}</td><td>{added}</td><td><a href="/update/{id}">Update</a> <a href="/delete/{id}">Delete</a></td></tr>"#,
            display_id = escape(&seed.display_id),
            name = escape(&seed.name),
            seed_type = escape(&seed.seed_type),
            quantity = seed.quantity,
            supplier = escape(&seed.supplier),
            status = escape(&seed.status),
            added = seed.created_at.format("%Y-%m-%d %H:%M"),
            id = seed.internal_id,
        );
    }
    body.push_str("</tbody>\n</table>");

    page("Seed Report", &body)
}

pub fn status(summary: &StatusSummary) -> Html<String> {
    page(
        "Status Overview",
        &format!(
            r#"<dl>
<dt>Available</dt><dd id="available-count">{available}</dd>
<dt>Low Stock</dt><dd id="low-stock-count">{low_stock}</dd>
<dt>Expired</dt><dd id="expired-count">{expired}</dd>
</dl>
<p>{total} seed records in total, {other} with another status.</p>"#,
            available = summary.available,
            low_stock = summary.low_stock,
            expired = summary.expired,
            total = summary.total,
            other = summary.other(),
        ),
    )
}
