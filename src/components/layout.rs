//! Base layout components for the web UI.
//!
//! This module provides the HTML skeleton, header and footer shared by
//! every dashboard page.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::button::Button;
use super::form::Form;

pub const SITE_TITLE: &str = "YouTube Analytics Seguro";

/// Page styles, inlined so the dashboard ships as a single binary.
const STYLE: &str = r"
:root { --fg: #18181b; --muted: #71717a; --border: #e4e4e7; --bg: #fafafa; --accent: #dc2626; }
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; color: var(--fg); background: var(--bg); }
.container { max-width: 1200px; margin: 0 auto; padding: 1rem; }
header nav { display: flex; justify-content: space-between; align-items: center; }
header form { margin: 0; }
article { padding: 0.75rem 1rem; border-radius: 0.375rem; margin: 1rem 0; border: 1px solid var(--border); }
article.error { background: #fef2f2; border-color: #fecaca; }
article.warning { background: #fffbeb; border-color: #fde68a; }
article.success { background: #f0fdf4; border-color: #bbf7d0; }
article.info { background: #eff6ff; border-color: #bfdbfe; }
.btn { display: inline-block; padding: 0.5rem 1rem; border-radius: 0.375rem; border: 1px solid var(--accent); cursor: pointer; text-decoration: none; font: inherit; }
.btn-primary { background: var(--accent); color: #fff; }
.btn-secondary { background: #fff; color: var(--accent); }
.btn.outline { background: transparent; color: var(--fg); border-color: var(--border); }
form label { display: block; margin: 0.75rem 0 0.25rem; font-weight: 500; }
form input { width: 100%; max-width: 24rem; padding: 0.5rem; border: 1px solid var(--border); border-radius: 0.375rem; }
form .btn { margin-top: 1rem; }
.table-responsive { overflow-x: auto; }
.stats-table { width: 100%; border-collapse: collapse; background: #fff; }
.stats-table th, .stats-table td { padding: 0.5rem; border-bottom: 1px solid var(--border); text-align: left; }
.charts { display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 1.5rem; margin: 1.5rem 0; }
.bar-chart { margin: 0; background: #fff; border: 1px solid var(--border); border-radius: 0.375rem; padding: 1rem; }
.bar-chart figcaption { font-weight: 600; margin-bottom: 0.75rem; }
.bar-row { display: grid; grid-template-columns: 10rem 1fr 4rem; gap: 0.5rem; align-items: center; margin: 0.25rem 0; }
.bar-label { overflow: hidden; text-overflow: ellipsis; white-space: nowrap; font-size: 0.875rem; }
.bar-track { background: #f4f4f5; height: 1rem; border-radius: 0.25rem; }
.bar-fill { height: 100%; border-radius: 0.25rem; background: #2563eb; }
.bar-likes { background: #16a34a; }
.bar-comments { background: #9333ea; }
.bar-value { text-align: right; font-variant-numeric: tabular-nums; font-size: 0.875rem; }
footer { color: var(--muted); font-size: 0.875rem; }
";

/// Base page layout builder.
///
/// ```ignore
/// let page = BaseLayout::new("Painel", Some("william")).render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    username: Option<&'a str>,
}

impl<'a> BaseLayout<'a> {
    /// Pass `None` for visitors that have not logged in.
    #[must_use]
    pub fn new(title: &'a str, username: Option<&'a str>) -> Self {
        Self { title, username }
    }

    /// Render the complete HTML page with the given content.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="pt-BR" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    meta name="robots" content="noindex";
                    title { (self.title) " - " (SITE_TITLE) }
                    link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🔒</text></svg>";
                    style { (PreEscaped(STYLE)) }
                }
                body {
                    (self.render_header())
                    main class="container" {
                        (content)
                    }
                    (Self::render_footer())
                }
            }
        }
    }

    fn render_header(&self) -> Markup {
        html! {
            header class="container" {
                nav {
                    h1 { "🔒 " (SITE_TITLE) }
                    @if let Some(username) = self.username {
                        (Form::post("/logout", html! {
                            span { (username) " " }
                            (Button::outline("Sair").r#type("submit"))
                        }))
                    }
                }
            }
        }
    }

    fn render_footer() -> Markup {
        html! {
            footer class="container" {
                "youtube-analytics " (env!("CARGO_PKG_VERSION"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_anonymous() {
        let html = BaseLayout::new("Login", None)
            .render(html! { p { "body" } })
            .into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Login - YouTube Analytics Seguro</title>"));
        assert!(html.contains("<p>body</p>"));
        assert!(!html.contains("/logout"));
    }

    #[test]
    fn test_layout_logged_in_shows_logout() {
        let html = BaseLayout::new("Painel", Some("william"))
            .render(html! {})
            .into_string();
        assert!(html.contains(r#"action="/logout""#));
        assert!(html.contains("william"));
    }
}
