//! Login page.

use maud::{html, Markup};

use crate::components::{Alert, BaseLayout, Button, Form, Input};

/// Render the login page.
///
/// ```ignore
/// let page = render_login_page(Some("Usuário ou senha incorretos"), None);
/// ```
#[must_use]
pub fn render_login_page(error: Option<&str>, username: Option<&str>) -> Markup {
    let content = html! {
        div class="auth-container" style="max-width: 28rem;" {
            h2 { "Login" }
            @if let Some(error) = error {
                (Alert::error(error))
            }
            (Form::post("/login", html! {
                (Input::text("username")
                    .label("Usuário")
                    .value_opt(username)
                    .autocomplete("username")
                    .required())
                (Input::password("password")
                    .label("Senha")
                    .autocomplete("current-password")
                    .required())
                (Button::primary("Login").r#type("submit"))
            }))
        }
    };

    BaseLayout::new("Login", None).render(content)
}

/// Render the page shown once the login limit has been exceeded.
#[must_use]
pub fn render_locked_page(message: &str) -> Markup {
    let content = html! {
        h2 { "Login" }
        (Alert::error(message))
    };
    BaseLayout::new("Login", None).render(content)
}
