use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use crate::content::Post;

const MIN_TITLE_LEN: usize = 3;
const MIN_SUMMARY_LEN: usize = 10;
const MIN_CONTENT_LEN: usize = 50;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Rule {
    TitleLength,
    SummaryLength,
    ContentLength,
    SlugFormat,
    MissingImage,
}

impl Rule {
    pub fn severity(&self) -> Severity {
        match self {
            Rule::MissingImage => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub file_name: PathBuf,
    pub slug: String,
    pub rule: Rule,
    pub message: String,
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {:?} - {}", self.file_name.display(), self.slug, self.rule, self.message)
    }
}

// Left as they are by URI encoding, escaped by form encoding
const URI_RESERVED: &[char] = &[';', ',', '/', '?', ':', '@', '&', '=', '+', '$', '!', '~', '\'', '(', ')', '#'];

/// A slug is URL safe when URI encoding leaves it untouched: no whitespace,
/// no `%`, no non-ASCII characters.
pub fn is_url_safe(slug: &str) -> bool {
    if slug.is_empty() || slug.chars().any(char::is_whitespace) {
        return false;
    }

    let rest: String = slug.chars().filter(|c| !URI_RESERVED.contains(c)).collect();
    match serde_urlencoded::to_string([("s", rest.as_str())]) {
        Ok(encoded) => encoded.strip_prefix("s=") == Some(rest.as_str()),
        Err(_) => false,
    }
}

/// Content quality rules for one post. `content` is only checked when it was loaded.
pub fn check_post(post: &Post) -> Vec<Violation> {
    let mut violations = vec![];
    let mut add = |rule: Rule, message: String| {
        violations.push(Violation {
            file_name: post.file_name.clone(),
            slug: post.slug.clone(),
            rule,
            message,
        });
    };

    let title_len = post.title.chars().count();
    if title_len < MIN_TITLE_LEN {
        add(Rule::TitleLength, format!("title has {} characters, at least {} expected", title_len, MIN_TITLE_LEN));
    }

    let summary_len = post.summary.chars().count();
    if summary_len < MIN_SUMMARY_LEN {
        add(Rule::SummaryLength, format!("summary has {} characters, at least {} expected", summary_len, MIN_SUMMARY_LEN));
    }

    if let Some(ref content) = post.content {
        let content_len = content.chars().count();
        if content_len < MIN_CONTENT_LEN {
            add(Rule::ContentLength, format!("content has {} characters, at least {} expected", content_len, MIN_CONTENT_LEN));
        }
    }

    if !is_url_safe(&post.slug) {
        add(Rule::SlugFormat, format!("slug `{}` is not URL safe", post.slug));
    }

    if post.image.is_empty() {
        add(Rule::MissingImage, "no asset matches the slug".to_string());
    }

    violations
}

pub fn check_posts(posts: &[Post]) -> Vec<Violation> {
    posts.iter().flat_map(check_post).collect()
}
