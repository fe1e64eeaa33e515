//! Server-rendered HTML for the summarizer form.

use super::form::{FormState, InputMethod, LANGUAGES};
use crate::summarizer::{
    MAX_SUMMARY_WORDS, MIN_SUMMARY_WORDS, SummaryStyle, TextStats, text::count_words,
};
use std::fmt::Write;

const PREVIEW_CHARS: usize = 500;
const LENGTH_STEP: u32 = 25;
const DOWNLOAD_FORM_ID: &str = "download-summary";

pub enum Outcome<'a> {
    Pending,
    Success {
        summary: &'a str,
        stats: &'a TextStats,
    },
    Failure {
        message: String,
        show_hint: bool,
    },
}

pub struct PageView<'a> {
    pub form: &'a FormState,
    /// Resolved input, used for stats and the upload preview.
    pub input_text: Option<&'a str>,
    pub outcome: Outcome<'a>,
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn selected(cond: bool) -> &'static str {
    if cond { " selected" } else { "" }
}

fn checked(cond: bool) -> &'static str {
    if cond { " checked" } else { "" }
}

fn render_options(form: &FormState) -> String {
    let mut html = String::new();

    html.push_str("<label>Summary Style <select name=\"style\">");
    for style in SummaryStyle::ALL {
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            style.form_value(),
            selected(style == form.style),
            style.label()
        );
    }
    html.push_str("</select></label>");

    let _ = write!(
        html,
        "<label>Summary Length (words) <input type=\"number\" name=\"max_words\" min=\"{}\" max=\"{}\" step=\"{}\" value=\"{}\"></label>",
        MIN_SUMMARY_WORDS, MAX_SUMMARY_WORDS, LENGTH_STEP, form.max_words
    );

    html.push_str("<label>Output Language <select name=\"language\">");
    for language in LANGUAGES {
        let _ = write!(
            html,
            "<option value=\"{0}\"{1}>{0}</option>",
            language,
            selected(language.eq_ignore_ascii_case(&form.language))
        );
    }
    html.push_str("</select></label>");

    html
}

fn render_input(view: &PageView<'_>) -> String {
    let form = view.form;
    let mut html = String::new();

    let _ = write!(
        html,
        "<fieldset><legend>Choose input method:</legend>\
         <label><input type=\"radio\" name=\"input_method\" value=\"paste\"{}> Type/Paste Text</label>\
         <label><input type=\"radio\" name=\"input_method\" value=\"upload\"{}> Upload File</label>\
         </fieldset>",
        checked(form.input_method == InputMethod::Paste),
        checked(form.input_method == InputMethod::Upload)
    );

    let _ = write!(
        html,
        "<label>Enter text to summarize:<textarea name=\"text\" rows=\"14\" placeholder=\"Paste your text here...\">{}</textarea></label>\
         <label>Upload a text file (.txt, .md)<input type=\"file\" name=\"file\" accept=\".txt,.md\"></label>",
        escape_html(&form.text)
    );

    if let Some(text) = view.input_text {
        if form.input_method == InputMethod::Upload {
            let _ = write!(
                html,
                "<label>File content preview:<textarea rows=\"8\" disabled>{}</textarea></label>",
                escape_html(&preview(text))
            );
        }
        if !text.is_empty() {
            let _ = write!(
                html,
                "<p class=\"info\">Text Stats: {} words, {} characters</p>",
                count_words(text),
                text.chars().count()
            );
        }
    }

    html
}

fn render_outcome(outcome: &Outcome<'_>) -> String {
    match outcome {
        Outcome::Pending => {
            "<p class=\"info\">Enter text and click 'Generate Summary' to see results here.</p>"
                .to_string()
        }
        Outcome::Success { summary, stats } => format!(
            "<p class=\"success\">Summary generated successfully!</p>\
             <label>Generated Summary:<textarea rows=\"14\" readonly>{summary}</textarea></label>\
             <p class=\"info\">Summary Stats: {words} words, {chars} characters ({compression}% compression)</p>\
             <textarea name=\"summary\" form=\"{form_id}\" hidden>{summary}</textarea>\
             <button type=\"submit\" form=\"{form_id}\">Download Summary</button>",
            form_id = DOWNLOAD_FORM_ID,
            summary = escape_html(summary),
            words = stats.summary_words,
            chars = stats.summary_chars,
            compression = stats.compression_percent,
        ),
        Outcome::Failure { message, show_hint } => {
            let mut html = format!(
                "<p class=\"error\">Error generating summary: {}</p>",
                escape_html(message)
            );
            if *show_hint {
                html.push_str("<p class=\"info\">Please check your API key and try again.</p>");
            }
            html
        }
    }
}

/// Target of the download button. Forms cannot nest, so this sits after the
/// summarize form and the button reaches it through its `form` attribute.
fn render_download_form(outcome: &Outcome<'_>) -> String {
    match outcome {
        Outcome::Success { .. } => format!(
            "<form id=\"{}\" method=\"post\" action=\"/download\"></form>",
            DOWNLOAD_FORM_ID
        ),
        _ => String::new(),
    }
}

pub fn render(view: &PageView<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AI Text Summarizer</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
main {{ display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }}
label {{ display: block; margin: 0.75rem 0; }}
textarea {{ width: 100%; }}
.info {{ color: #1d4f91; }}
.success {{ color: #1b7a33; }}
.error {{ color: #b3261e; }}
</style>
</head>
<body>
<h1>AI Text Summarizer</h1>
<p>Powered by Google Gemini</p>
<form method="post" action="/summarize" enctype="multipart/form-data">
<aside>{options}</aside>
<main>
<section><h2>Input Text</h2>{input}</section>
<section><h2>Generated Summary</h2>
<button type="submit">Generate Summary</button>
{outcome}
</section>
</main>
</form>
{download}
</body>
</html>
"#,
        options = render_options(view.form),
        input = render_input(view),
        outcome = render_outcome(&view.outcome),
        download = render_download_form(&view.outcome),
    )
}
