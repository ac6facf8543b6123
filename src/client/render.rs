use crate::model::FaqRecord;
use comrak::{Options, markdown_to_html as comrak_markdown_to_html};
use std::fmt::Write;

/// Shown when nothing matches the active filter and search.
pub const EMPTY_STATE: &str = "No questions match your search.";

/// Answers are authored in markdown. Raw HTML in the source is not passed
/// through.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    comrak_markdown_to_html(markdown, &options)
}

pub fn render_list_html(records: &[&FaqRecord]) -> String {
    if records.is_empty() {
        return format!("<p class=\"faq-empty\">{}</p>\n", escape_html(EMPTY_STATE));
    }

    let mut html = String::new();
    for record in records {
        let _ = writeln!(html, "<details class=\"faq-item\" data-row=\"{}\">", record.row_index);
        let _ = writeln!(html, "<summary>{}</summary>", escape_html(&record.question));
        let _ = writeln!(html, "<div class=\"faq-answer\">{}</div>", markdown_to_html(&record.answer));
        if !record.categories.is_empty() || !record.keywords.is_empty() {
            html.push_str("<p class=\"faq-tags\">");
            for label in &record.categories {
                let _ = write!(html, "<span class=\"tag category\">{}</span>", escape_html(label));
            }
            for label in &record.keywords {
                let _ = write!(html, "<span class=\"tag keyword\">{}</span>", escape_html(label));
            }
            html.push_str("</p>\n");
        }
        html.push_str("</details>\n");
    }
    html
}

pub fn render_list_text(records: &[&FaqRecord]) -> String {
    if records.is_empty() {
        return format!("{EMPTY_STATE}\n");
    }

    let mut text = String::new();
    for record in records {
        let _ = writeln!(text, "[{}] {}", record.row_index, record.question);
        for line in record.answer.lines() {
            let _ = writeln!(text, "    {line}");
        }
        if !record.categories.is_empty() {
            let _ = writeln!(text, "    categories: {}", record.encoded_categories());
        }
        if !record.keywords.is_empty() {
            let _ = writeln!(text, "    keywords: {}", record.encoded_keywords());
        }
        text.push('\n');
    }
    text
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
