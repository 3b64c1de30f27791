//! Button component for the web UI.
//!
//! Renders as a `<button>` or, when an href is set, an `<a>` styled as one.

use maud::{html, Markup, Render};

/// Button style variants matching CSS classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
}

impl ButtonVariant {
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Self::Primary => "btn btn-primary",
            Self::Secondary => "btn btn-secondary",
            Self::Outline => "btn outline",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Button<'a> {
    pub label: &'a str,
    pub variant: ButtonVariant,
    /// Renders as `<a>` if present
    pub href: Option<&'a str>,
    pub r#type: Option<&'a str>,
    /// Download attribute (for download links)
    pub download: Option<&'a str>,
}

impl<'a> Button<'a> {
    #[must_use]
    pub fn new(label: &'a str, variant: ButtonVariant) -> Self {
        Self {
            label,
            variant,
            href: None,
            r#type: None,
            download: None,
        }
    }

    #[must_use]
    pub fn primary(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Primary)
    }

    #[must_use]
    pub fn secondary(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Secondary)
    }

    #[must_use]
    pub fn outline(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Outline)
    }

    #[must_use]
    pub fn href(mut self, href: &'a str) -> Self {
        self.href = Some(href);
        self
    }

    #[must_use]
    pub fn r#type(mut self, r#type: &'a str) -> Self {
        self.r#type = Some(r#type);
        self
    }

    #[must_use]
    pub fn download(mut self, filename: &'a str) -> Self {
        self.download = Some(filename);
        self
    }
}

impl Render for Button<'_> {
    fn render(&self) -> Markup {
        let class = self.variant.class();
        html! {
            @if let Some(href) = self.href {
                a href=(href) class=(class) role="button" download=[self.download] {
                    (self.label)
                }
            } @else {
                button type=(self.r#type.unwrap_or("button")) class=(class) {
                    (self.label)
                }
            }
        }
    }
}
