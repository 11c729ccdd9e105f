/// Presentation selector and HTML rendering of the APOD screen
use crate::domain::{ApodRecord, MediaType, RequestOutcome};
use crate::utils::escape_html;
use serde::Serialize;

pub const LOADING_LABEL: &str = "Cargando imagen del día...";
pub const ERROR_HEADLINE: &str = "Houston, tenemos un problema 🚀";
pub const RETRY_LABEL: &str = "Reintentar";
pub const EXPLANATION_HEADING: &str = "Explicación:";
pub const VIDEO_NOTICE: &str = "El contenido de hoy es un video, no se puede mostrar aquí.";

/// What the rendering surface should show for one outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewInstruction {
    Progress {
        label: &'static str,
    },
    Error {
        headline: &'static str,
        message: String,
        retry_label: &'static str,
    },
    Content(ContentView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentView {
    pub title: String,
    pub date: String,
    pub media: MediaView,
    pub explanation_heading: &'static str,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaView {
    Image { url: String },
    VideoNotice { notice: &'static str },
}

/// Map an outcome to its view. Total and side-effect free.
pub fn select_view(outcome: &RequestOutcome) -> ViewInstruction {
    match outcome {
        RequestOutcome::Idle | RequestOutcome::Loading => ViewInstruction::Progress {
            label: LOADING_LABEL,
        },
        RequestOutcome::Failure { message, .. } => ViewInstruction::Error {
            headline: ERROR_HEADLINE,
            message: message.clone(),
            retry_label: RETRY_LABEL,
        },
        RequestOutcome::Success { payload } => ViewInstruction::Content(content_view(payload)),
    }
}

fn content_view(record: &ApodRecord) -> ContentView {
    let media = match record.media_type {
        MediaType::Image => MediaView::Image {
            url: record.url.clone(),
        },
        MediaType::Video => MediaView::VideoNotice {
            notice: VIDEO_NOTICE,
        },
    };

    ContentView {
        title: record.title.clone(),
        date: record.date.clone(),
        media,
        explanation_heading: EXPLANATION_HEADING,
        explanation: record.explanation.clone(),
        attribution: record
            .copyright
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(|c| format!("© {}", c)),
    }
}

const STYLE: &str = "body{margin:0;background:#0d1117;color:#c9d1d9;font-family:sans-serif}\
main{max-width:720px;margin:0 auto;padding:20px;text-align:center}\
.error{color:#f85149;font-size:18px}\
.date,.notice,.copyright{color:#8b949e}\
.copyright{font-size:12px;font-style:italic;margin-top:20px}\
.explanation{text-align:justify;line-height:24px}\
img{width:100%;border-radius:10px;border:1px solid #30363d}\
button{background:#0b3d91;color:#fff;border:0;padding:8px 16px;font-size:16px}";

/// Render a view instruction as a standalone HTML page
pub fn render_html(view: &ViewInstruction) -> String {
    let (refresh, body) = match view {
        ViewInstruction::Progress { label } => (
            true,
            format!("<p class=\"loading\">{}</p>", escape_html(label)),
        ),
        ViewInstruction::Error {
            headline,
            message,
            retry_label,
        } => (
            false,
            format!(
                "<p class=\"error\">{}</p><p class=\"error\">{}</p>\
                 <form method=\"post\" action=\"/retry\"><button type=\"submit\">{}</button></form>",
                escape_html(headline),
                escape_html(message),
                escape_html(retry_label)
            ),
        ),
        ViewInstruction::Content(content) => (false, render_content(content)),
    };

    let refresh_meta = if refresh {
        "<meta http-equiv=\"refresh\" content=\"1\">"
    } else {
        ""
    };

    format!(
        "<!DOCTYPE html><html lang=\"es\"><head><meta charset=\"utf-8\">{}\
         <title>APOD</title><style>{}</style></head><body><main>{}</main></body></html>",
        refresh_meta, STYLE, body
    )
}

fn render_content(content: &ContentView) -> String {
    let media = match &content.media {
        MediaView::Image { url } => format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(url),
            escape_html(&content.title)
        ),
        MediaView::VideoNotice { notice } => {
            format!("<p class=\"notice\">{}</p>", escape_html(notice))
        }
    };

    let attribution = content
        .attribution
        .as_ref()
        .map(|line| format!("<p class=\"copyright\">{}</p>", escape_html(line)))
        .unwrap_or_default();

    format!(
        "<h1>{}</h1><p class=\"date\">{}</p>{}<h2>{}</h2><p class=\"explanation\">{}</p>{}",
        escape_html(&content.title),
        escape_html(&content.date),
        media,
        escape_html(content.explanation_heading),
        escape_html(&content.explanation),
        attribution
    )
}
