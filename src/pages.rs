//! Minimal inline HTML rendering. No template engine; each page is built
//! from small string builders plus a shared layout.

use axum::response::Html;

use crate::db::Product;
use crate::session::Flash;

/// Escape text for safe interpolation into HTML.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, flash: Option<&Flash>, body: &str) -> Html<String> {
    let flash_html = flash
        .map(|f| {
            format!(
                r#"<p class="flash {}">{}</p>"#,
                escape(&f.level),
                escape(&f.message)
            )
        })
        .unwrap_or_default();
    Html(format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n<nav><a href=\"/\">Home</a> <a href=\"/products\">Products</a> \
         <a href=\"/contact\">Contact</a></nav>\n{}\n{}\n</body></html>",
        escape(title),
        flash_html,
        body
    ))
}

fn product_card(p: &Product) -> String {
    let mut card = format!(
        "<div class=\"product\"><h3>{}</h3><p>{}</p><p>${:.2}</p>",
        escape(&p.name),
        escape(&p.description),
        p.price
    );
    if let Some(image) = p.image_path.as_deref().filter(|s| !s.is_empty()) {
        card.push_str(&format!(
            "<img src=\"/static/{}\" alt=\"{}\">",
            escape(image),
            escape(&p.name)
        ));
    }
    if let Some(url) = p.url.as_deref().filter(|s| !s.is_empty()) {
        card.push_str(&format!("<a href=\"{}\">View deal</a>", escape(url)));
    }
    card.push_str("</div>");
    card
}

pub fn home(cover_photo: &str, products: &[Product], flash: Option<&Flash>) -> Html<String> {
    let cards: String = products.iter().map(product_card).collect();
    let body = format!(
        "<img class=\"cover\" src=\"/static/{}\" alt=\"cover photo\">\n<h1>Latest Deals</h1>\n{}",
        escape(cover_photo),
        cards
    );
    layout("Home", flash, &body)
}

pub fn products(products: &[Product], flash: Option<&Flash>) -> Html<String> {
    let cards: String = products.iter().map(product_card).collect();
    layout("Products", flash, &format!("<h1>Products</h1>\n{cards}"))
}

pub fn contact(flash: Option<&Flash>) -> Html<String> {
    let body = "<h1>Contact Us</h1>\n\
        <form method=\"post\" action=\"/contact\">\n\
        <input name=\"name\" placeholder=\"Name\" required>\n\
        <input name=\"email\" type=\"email\" placeholder=\"Email\" required>\n\
        <textarea name=\"message\" placeholder=\"Message\" required></textarea>\n\
        <button type=\"submit\">Send</button>\n</form>";
    layout("Contact", flash, body)
}

pub fn admin_login(flash: Option<&Flash>) -> Html<String> {
    let body = "<h1>Admin Login</h1>\n\
        <form method=\"post\" action=\"/admin\">\n\
        <input name=\"username\" placeholder=\"Username\" required>\n\
        <input name=\"password\" type=\"password\" placeholder=\"Password\" required>\n\
        <button type=\"submit\">Log in</button>\n</form>";
    layout("Admin Login", flash, body)
}

pub fn admin_dashboard(
    cover_photo: &str,
    products: &[Product],
    flash: Option<&Flash>,
) -> Html<String> {
    let mut rows = String::new();
    for p in products {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>${:.2}</td>\
             <td><a href=\"/admin/product/edit/{}\">Edit</a></td>\
             <td><form method=\"post\" action=\"/admin/product/delete/{}\">\
             <button type=\"submit\">Delete</button></form></td></tr>",
            p.id,
            escape(&p.name),
            p.price,
            p.id,
            p.id
        ));
    }
    let body = format!(
        "<h1>Admin Dashboard</h1>\n<a href=\"/admin/logout\">Log out</a>\n\
         <h2>Cover photo</h2>\n<img class=\"cover\" src=\"/static/{}\" alt=\"cover photo\">\n\
         <form method=\"post\" action=\"/admin/cover_photo\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"cover_photo\">\n\
         <button type=\"submit\">Replace cover photo</button>\n</form>\n\
         <h2>Products</h2>\n<a href=\"/admin/product/new\">New product</a>\n\
         <table><tr><th>Id</th><th>Name</th><th>Price</th><th></th><th></th></tr>{}</table>",
        escape(cover_photo),
        rows
    );
    layout("Admin Dashboard", flash, &body)
}

/// Create/edit form; prefilled when editing an existing product.
pub fn product_form(product: Option<&Product>, flash: Option<&Flash>) -> Html<String> {
    let (title, action) = match product {
        Some(p) => (
            "Edit Product".to_string(),
            format!("/admin/product/edit/{}", p.id),
        ),
        None => ("New Product".to_string(), "/admin/product/new".to_string()),
    };
    let name = product.map(|p| escape(&p.name)).unwrap_or_default();
    let description = product.map(|p| escape(&p.description)).unwrap_or_default();
    let price = product.map(|p| p.price.to_string()).unwrap_or_default();
    let url = product
        .and_then(|p| p.url.as_deref())
        .map(escape)
        .unwrap_or_default();
    let body = format!(
        "<h1>{title}</h1>\n\
         <form method=\"post\" action=\"{action}\" enctype=\"multipart/form-data\">\n\
         <input name=\"name\" value=\"{name}\" placeholder=\"Name\" required>\n\
         <textarea name=\"description\" placeholder=\"Description\" required>{description}</textarea>\n\
         <input name=\"price\" value=\"{price}\" placeholder=\"Price\" required>\n\
         <input name=\"url\" value=\"{url}\" placeholder=\"External link (optional)\">\n\
         <input type=\"file\" name=\"image\">\n\
         <button type=\"submit\">Save</button>\n</form>"
    );
    layout(&title, flash, &body)
}
