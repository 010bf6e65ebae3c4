use anyhow::Result;
use clap::ValueEnum;
use std::fmt;

use crate::fetcher::FetchState;
use crate::ui::{self, Colors};

/// One rendered element of the results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLine {
    Loading,
    NotFound { username: String },
    Link { text: String, href: String },
}

impl fmt::Display for ViewLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading..."),
            Self::NotFound { username } => {
                write!(f, "Repositories under username '{username}' is not found.")
            }
            Self::Link { text, href } => write!(f, "{text} <{href}>"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

/// Derive what the page shows for the typed `username` and fetcher state.
///
/// An empty list reads as "not found" whatever the cause; only an empty
/// username suppresses the message.
#[must_use]
pub fn view_lines(username: &str, state: &FetchState) -> Vec<ViewLine> {
    if state.is_loading() {
        return vec![ViewLine::Loading];
    }

    if state.repositories().is_empty() {
        if username.is_empty() {
            return Vec::new();
        }
        return vec![ViewLine::NotFound {
            username: username.to_string(),
        }];
    }

    state
        .repositories()
        .iter()
        .map(|repo| ViewLine::Link {
            text: repo.full_name.clone(),
            href: repo.html_url.clone(),
        })
        .collect()
}

#[must_use]
pub fn render_text(lines: &[ViewLine], color: bool) -> String {
    let mut out = String::new();
    for line in lines {
        let rendered = match line {
            ViewLine::Loading => ui::paint(&line.to_string(), Colors::YELLOW, color),
            ViewLine::NotFound { .. } => ui::paint(&line.to_string(), Colors::RED, color),
            ViewLine::Link { text, href } if color => {
                format!("  • {}", ui::paint(&ui::hyperlink(text, href), Colors::GREEN, true))
            }
            ViewLine::Link { text, href } => format!("  • {text} ({href})"),
        };
        out.push_str(&rendered);
        out.push('\n');
    }
    out
}

#[must_use]
pub fn render_html(lines: &[ViewLine]) -> String {
    let mut out = String::new();
    let mut items = String::new();

    for line in lines {
        match line {
            ViewLine::Loading | ViewLine::NotFound { .. } => {
                out.push_str(&format!("<p>{}</p>\n", escape_html(&line.to_string())));
            }
            ViewLine::Link { text, href } => {
                items.push_str(&format!(
                    "  <li><a href=\"{}\">{}</a></li>\n",
                    escape_html(href),
                    escape_html(text)
                ));
            }
        }
    }

    out.push_str("<ul>\n");
    out.push_str(&items);
    out.push_str("</ul>\n");
    out
}

pub fn render_json(username: &str, state: &FetchState) -> Result<String> {
    let value = serde_json::json!({
        "username": username,
        "loading": state.is_loading(),
        "repositories": state.repositories(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
