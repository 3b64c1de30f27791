//! Server-rendered horizontal bar charts.

use maud::{html, Markup, Render};

/// One bar: a label and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar<'a> {
    pub label: &'a str,
    pub value: u64,
}

/// A titled bar chart scaled to its largest value.
#[derive(Debug, Clone)]
pub struct BarChart<'a> {
    pub title: &'a str,
    pub bars: Vec<Bar<'a>>,
    /// Extra class for the bar color (`.bar-views`, `.bar-likes`, ...)
    pub color_class: Option<&'a str>,
}

impl<'a> BarChart<'a> {
    #[must_use]
    pub fn new(title: &'a str, bars: Vec<Bar<'a>>) -> Self {
        Self {
            title,
            bars,
            color_class: None,
        }
    }

    #[must_use]
    pub fn color_class(mut self, class: &'a str) -> Self {
        self.color_class = Some(class);
        self
    }

    fn max_value(&self) -> u64 {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }
}

/// Bar width as a percentage of `max`. An all-zero series yields 0.
#[must_use]
pub fn bar_width_percent(value: u64, max: u64) -> f64 {
    if max == 0 {
        0.0
    } else {
        value as f64 * 100.0 / max as f64
    }
}

impl Render for BarChart<'_> {
    fn render(&self) -> Markup {
        let max = self.max_value();
        let fill_class = match self.color_class {
            Some(extra) => format!("bar-fill {extra}"),
            None => "bar-fill".to_string(),
        };

        html! {
            figure class="bar-chart" {
                figcaption { (self.title) }
                @for bar in &self.bars {
                    div class="bar-row" {
                        span class="bar-label" title=(bar.label) { (bar.label) }
                        div class="bar-track" {
                            div class=(fill_class)
                                style=(format!("width: {:.1}%", bar_width_percent(bar.value, max))) {}
                        }
                        span class="bar-value" { (bar.value) }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width_percent() {
        assert!((bar_width_percent(50, 200) - 25.0).abs() < f64::EPSILON);
        assert!((bar_width_percent(200, 200) - 100.0).abs() < f64::EPSILON);
        assert!(bar_width_percent(0, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_chart_render() {
        let chart = BarChart::new(
            "Views por vídeo",
            vec![
                Bar { label: "A", value: 10 },
                Bar { label: "B", value: 40 },
            ],
        )
        .color_class("bar-views");
        let html = chart.render().into_string();

        assert!(html.contains("<figcaption>Views por vídeo</figcaption>"));
        assert!(html.contains("width: 25.0%"));
        assert!(html.contains("width: 100.0%"));
        assert!(html.contains("bar-fill bar-views"));
    }

    #[test]
    fn test_chart_all_zero() {
        let html = BarChart::new("Likes", vec![Bar { label: "A", value: 0 }])
            .render()
            .into_string();
        assert!(html.contains("width: 0.0%"));
    }
}
