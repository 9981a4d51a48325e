//! Word-by-word entrance for the hero heading.

use gloo_timers::callback::Timeout;
use once_cell::sync::Lazy;
use regex::Regex;
use web_sys::Document;

use crate::config::SiteConfig;
use crate::dom::{self, anchors};
use crate::error::SiteResult;

#[cfg(test)]
#[path = "text_reveal_test.rs"]
mod text_reveal_test;

static SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+|<br\s*/?>").expect("separator pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Word(&'a str),
    Space(&'a str),
    Break(&'a str),
}

/// Splits heading markup into words, whitespace runs and `<br>` tags,
/// keeping every separator verbatim.
pub fn tokenize(html: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for sep in SEPARATOR.find_iter(html) {
        if sep.start() > last {
            tokens.push(Token::Word(&html[last..sep.start()]));
        }
        let text = sep.as_str();
        if text.starts_with('<') {
            tokens.push(Token::Break(text));
        } else {
            tokens.push(Token::Space(text));
        }
        last = sep.end();
    }
    if last < html.len() {
        tokens.push(Token::Word(&html[last..]));
    }
    tokens
}

/// Markup with every word wrapped in `<span class="word">`.
pub fn wrap_words(tokens: &[Token<'_>]) -> String {
    let mut html = String::new();
    for token in tokens {
        match token {
            Token::Word(word) => {
                html.push_str("<span class=\"word\">");
                html.push_str(word);
                html.push_str("</span>");
            }
            Token::Space(text) | Token::Break(text) => html.push_str(text),
        }
    }
    html
}

pub fn word_delay_ms(index: usize, config: &SiteConfig) -> u32 {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    config
        .text_reveal_base_ms
        .saturating_add(index.saturating_mul(config.text_reveal_step_ms))
}

pub fn attach(document: &Document, config: &SiteConfig) -> SiteResult<usize> {
    let title = dom::by_id(document, anchors::HERO_TITLE)?;
    if dom::prefers_reduced_motion() {
        return Ok(0);
    }

    let original = title.inner_html();
    title.set_inner_html(&wrap_words(&tokenize(&original)));

    let words = dom::query_all(&title, ".word");
    for (i, word) in words.iter().enumerate() {
        let word = word.clone();
        Timeout::new(word_delay_ms(i, config), move || {
            dom::add_class(&word, "visible");
        })
        .forget();
    }
    Ok(words.len())
}
