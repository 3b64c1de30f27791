//! Table components for maud templates.

use maud::{html, Markup, Render};

/// Table variant determines the CSS class applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableVariant {
    #[default]
    Default,
    /// Per-video statistics table (`.stats-table`)
    Stats,
}

impl TableVariant {
    #[must_use]
    pub fn class(&self) -> Option<&'static str> {
        match self {
            TableVariant::Default => None,
            TableVariant::Stats => Some("stats-table"),
        }
    }
}

/// A table element with headers and rows.
#[derive(Debug)]
pub struct Table<'a> {
    pub variant: TableVariant,
    pub headers: Vec<&'a str>,
    /// Pre-rendered row content
    pub rows: Vec<Markup>,
}

impl<'a> Table<'a> {
    #[must_use]
    pub fn new(headers: Vec<&'a str>) -> Self {
        Self {
            variant: TableVariant::Default,
            headers,
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn variant(mut self, variant: TableVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn rows(mut self, rows: Vec<Markup>) -> Self {
        self.rows = rows;
        self
    }
}

impl Render for Table<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="table-responsive" {
                table class=[self.variant.class()] {
                    @if !self.headers.is_empty() {
                        thead {
                            tr {
                                @for header in &self.headers {
                                    th { (header) }
                                }
                            }
                        }
                    }
                    tbody {
                        @for row in &self.rows {
                            (row)
                        }
                    }
                }
            }
        }
    }
}

/// A simple helper to create a table row from string cells.
#[must_use]
pub fn simple_row(cells: &[&str]) -> Markup {
    html! {
        tr {
            @for cell in cells {
                td { (*cell) }
            }
        }
    }
}
