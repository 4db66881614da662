//! html for the two views
//!
//! the page reloads itself so refreshed values show up without the viewer
//! doing anything.

use super::catalog::Catalog;
use super::view::{DetailView, View};

const STYLE: &str = r#"
body { font-family: system-ui; margin: 0; padding: 2rem; background: #f3f7f0; color: #243b2a; }
h1 { margin-top: 0; }
#gallery { display: flex; flex-wrap: wrap; gap: 1.5rem; }
.card { display: block; width: 220px; background: #fff; border-radius: 12px; padding: 1rem;
        text-decoration: none; color: inherit; box-shadow: 0 2px 6px rgba(0,0,0,.1); }
.card img { width: 100%; height: 160px; object-fit: cover; border-radius: 8px; }
.status { font-size: .9rem; color: #5b7a61; }
#data-container { background: #fff; border-radius: 12px; padding: 1.5rem; max-width: 640px; }
#data-container img { max-width: 240px; border-radius: 8px; }
table { border-collapse: collapse; margin: 1rem 0; }
td { padding: .3rem 1rem .3rem 0; }
"#;

pub fn render_page(view: &View, catalog: &Catalog, refresh_secs: u64) -> String {
    let body = match view {
        View::Gallery => render_gallery(catalog),
        View::Detail(detail) => render_detail(detail),
    };

    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta http-equiv="refresh" content="{refresh_secs}">
<title>Plant Monitor</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>"#
    )
}

fn render_gallery(catalog: &Catalog) -> String {
    let mut cards = String::new();
    for (name, plant) in catalog.iter() {
        cards.push_str(&format!(
            r#"  <a class="card" href="/plants/{href}">
    <img src="{image}" alt="{name}">
    <h2>{name}</h2>
    <div class="status">{status}</div>
  </a>
"#,
            href = encode_path_segment(name),
            image = html_escape(&plant.image),
            name = html_escape(name),
            status = html_escape(&plant.status),
        ));
    }
    format!("<h1>My Plants</h1>\n<div id=\"gallery\">\n{cards}</div>")
}

fn render_detail(d: &DetailView) -> String {
    let row = |label: &str, id: &str, value: &str| {
        format!(
            "<tr><td>{}</td><td id=\"{}\">{}</td></tr>\n",
            label,
            id,
            html_escape(value)
        )
    };

    let mut current = String::new();
    current.push_str(&row("Temperature", "temperature", &d.temperature));
    current.push_str(&row("Humidity", "humidity", &d.humidity));
    current.push_str(&row("Soil moisture", "soil-moisture", &d.soil_moisture));
    current.push_str(&row("Light", "light", &d.light));

    let mut ideal = String::new();
    ideal.push_str(&row("Temperature", "ideal-temperature", &d.ideal_temperature));
    ideal.push_str(&row("Humidity", "ideal-humidity", &d.ideal_humidity));
    ideal.push_str(&row("Soil moisture", "ideal-soil-moisture", &d.ideal_soil_moisture));
    ideal.push_str(&row("Light", "ideal-light", &d.ideal_light));

    format!(
        r#"<div id="data-container">
<a href="/back">&larr; Back</a>
<h1 id="plant-name">{name}</h1>
<img src="{image}" alt="{name}">
<div class="status" id="status">{status}</div>
<h3>Current conditions</h3>
<table>
{current}</table>
<h3>Ideal environment</h3>
<table>
{ideal}</table>
<p id="fact">{fact}</p>
</div>"#,
        name = html_escape(&d.plant_name),
        image = html_escape(&d.image),
        status = html_escape(&d.status),
        fact = html_escape(&d.fact),
    )
}

/// escape html special characters to prevent xss
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// percent-encode a plant name for use as one url path segment
fn encode_path_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::view::Dashboard;

    #[test]
    fn gallery_links_every_plant() {
        let catalog = Catalog::builtin();
        let html = render_page(&View::Gallery, &catalog, 1);
        assert!(html.contains(r#"href="/plants/Ashwagandha""#));
        assert!(html.contains(r#"href="/plants/Common%20Herbs""#));
        assert!(html.contains(r#"content="1""#));
        assert!(!html.contains(r#"id="data-container""#));
    }

    #[test]
    fn detail_shows_fields_and_back_link() {
        let mut d = Dashboard::new(Catalog::builtin(), "Ashwagandha");
        d.select("Ashwagandha");
        let html = render_page(d.view(), d.catalog(), 1);
        assert!(html.contains(r#"<h1 id="plant-name">Ashwagandha</h1>"#));
        assert!(html.contains(r#"<td id="temperature">28 °C</td>"#));
        assert!(html.contains(r#"<td id="ideal-humidity">50-70%</td>"#));
        assert!(html.contains(r#"href="/back""#));
        assert!(!html.contains(r#"id="gallery""#));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(html_escape(r#"<b a="1">&"#), "&lt;b a=&quot;1&quot;&gt;&amp;");
        assert_eq!(encode_path_segment("a/b é"), "a%2Fb%20%C3%A9");
    }
}
