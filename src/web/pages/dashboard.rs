//! Channel dashboard pages: the Google connect prompt, the report itself,
//! and the error page shown when the YouTube API call fails.

use maud::{html, Markup, Render};

use crate::components::{simple_row, Alert, Bar, BarChart, BaseLayout, Button, Table, TableVariant};
use crate::report::{ChannelReport, VideoReport};
use crate::spreadsheet::HEADERS;

/// Render the prompt to connect a Google account.
#[must_use]
pub fn render_connect_page(username: &str, error: Option<&str>) -> Markup {
    let content = html! {
        @if let Some(error) = error {
            (Alert::error(error))
        }
        (Alert::warning("Conecte sua conta YouTube"))
        p {
            (Button::primary("👉 Conectar ao Google").href("/oauth/connect"))
        }
    };
    BaseLayout::new("Conectar", Some(username)).render(content)
}

/// Render the channel report.
#[must_use]
pub fn render_dashboard_page(username: &str, report: &ChannelReport) -> Markup {
    let content = html! {
        section {
            h2 { "📺 Informações do Canal" }
            p { strong { "Canal: " } (report.channel_title) }
            p { "👥 Inscritos: " (report.subscribers) }
        }

        section {
            h2 { "📊 Estatísticas e Sugestões dos Últimos Vídeos" }
            @if report.videos.is_empty() {
                (Alert::info("Nenhum vídeo encontrado neste canal."))
            } @else {
                (render_video_table(&report.videos))
                div class="charts" {
                    (metric_chart("📊 Views por vídeo", &report.videos, |v| v.views, "bar-views"))
                    (metric_chart("👍 Likes por vídeo", &report.videos, |v| v.likes, "bar-likes"))
                    (metric_chart("💬 Comentários por vídeo", &report.videos, |v| v.comments, "bar-comments"))
                }
            }
        }

        p {
            (Button::secondary("⬇️ Baixar Excel (.xlsx)").href("/export.xlsx").download(""))
        }
    };

    BaseLayout::new("Painel", Some(username)).render(content)
}

/// Render a failure to load the channel data.
#[must_use]
pub fn render_error_page(username: &str, message: &str) -> Markup {
    let content = html! {
        (Alert::error(message).with_title("Erro:"))
        p { a href="/" { "Tentar novamente" } }
    };
    BaseLayout::new("Erro", Some(username)).render(content)
}

fn render_video_table(videos: &[VideoReport]) -> Markup {
    let rows = videos
        .iter()
        .map(|video| {
            let published = video.published_at.format("%Y-%m-%d %H:%M:%S").to_string();
            let views = video.views.to_string();
            let likes = video.likes.to_string();
            let comments = video.comments.to_string();
            simple_row(&[
                video.title.as_str(),
                published.as_str(),
                views.as_str(),
                likes.as_str(),
                comments.as_str(),
                video.title_suggestion.label(),
                video.description_suggestion.label(),
            ])
        })
        .collect();

    Table::new(HEADERS.to_vec())
        .variant(TableVariant::Stats)
        .rows(rows)
        .render()
}

fn metric_chart(
    title: &str,
    videos: &[VideoReport],
    metric: impl Fn(&VideoReport) -> u64,
    color_class: &str,
) -> Markup {
    let bars = videos
        .iter()
        .map(|v| Bar {
            label: &v.title,
            value: metric(v),
        })
        .collect();
    BarChart::new(title, bars).color_class(color_class).render()
}
