use hd_core::{Digest, DigestArticle};
use crate::view::ViewState;

pub const EMPTY_SUMMARY: &str = "No summary could be generated.";
pub const NO_ARTICLES: &str = "No relevant articles found.";

/// HTML fragments for one digest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    /// One `<p>` per summary paragraph
    pub summary_blocks: Vec<String>,
    /// One card per article, or the placeholder when there are none
    pub cards: Vec<String>,
}

impl Rendered {
    pub fn summary_html(&self) -> String {
        self.summary_blocks.concat()
    }

    pub fn cards_html(&self) -> String {
        self.cards.concat()
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Summary paragraphs, split on blank lines. The summary is trusted markup (`<b>` from the summarizer).
pub fn summary_paragraphs(summary: &str) -> Vec<String> {
    let summary = if summary.trim().is_empty() { EMPTY_SUMMARY } else { summary };
    summary
        .replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn render_card(article: &DigestArticle) -> String {
    format!(
        r#"<div class="card article-item">
  <div class="card-header">
    <span class="badge">{score} pts</span>
    <span class="date">{age}</span>
  </div>
  <h3><a href="{url}" target="_blank" rel="noopener">{title}</a></h3>
  <div class="card-footer">
    <a href="{discussion}" target="_blank" rel="noopener">View on HN &rarr;</a>
  </div>
</div>
"#,
        score = article.score,
        age = escape_html(&article.age_text),
        url = escape_html(&article.url),
        title = escape_html(&article.title),
        discussion = escape_html(&article.discussion_url()),
    )
}

pub fn render(digest: &Digest) -> Rendered {
    let summary_blocks = summary_paragraphs(&digest.summary)
        .into_iter()
        .map(|p| format!("<p>{}</p>", p))
        .collect();

    let cards = if digest.articles.is_empty() {
        vec![format!(r#"<p class="empty">{}</p>"#, NO_ARTICLES)]
    } else {
        digest.articles.iter().map(render_card).collect()
    };

    Rendered { summary_blocks, cards }
}

fn hidden(visible: bool) -> &'static str {
    if visible { "" } else { " hidden" }
}

/// A standalone page for the current view.
pub fn render_page(view: &ViewState) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Tech Digest</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<main class="container">
<h1>Tech Digest</h1>
<form action="/digest" method="get"><button id="start-btn" class="btn{trigger_hidden}" type="submit">{label}</button></form>
<div id="loading" class="loading{loading_hidden}">Scraping and summarizing&hellip;</div>
<div id="error-message" class="error{error_hidden}"><p>Something went wrong.</p><p id="error-details">{error}</p></div>
<section id="results-view" class="results{results_hidden}">
<div id="global-summary-text" class="card summary">
{summary}
</div>
<div id="results-container">
{cards}</div>
</section>
</main>
</body>
</html>
"#,
        trigger_hidden = hidden(view.trigger_visible),
        label = escape_html(&view.trigger_label),
        loading_hidden = hidden(view.loading_visible),
        error_hidden = hidden(view.error_visible),
        error = escape_html(&view.error_message),
        results_hidden = hidden(view.results_visible),
        summary = view.rendered.summary_html(),
        cards = view.rendered.cards_html(),
    )
}
