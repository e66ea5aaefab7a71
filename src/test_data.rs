#![cfg(test)]

use std::path::Path;
use std::{fs, io};

use chrono::{TimeZone, Utc};

use crate::config::Author;
use crate::feed::{Feed, FeedImage, FeedItem, FeedLinks};

pub const ASSET_BASE: &str = "https://raw.githubusercontent.com/lbugasu/blog-posts/main/assets/";

pub const POST_ALPHA: &str = r##"---
slug: a
publishedOn: 2024-01-01
title: Alpha Post
summary: A short summary text
type: dev
tags:
  - rust
  - cli
imageDescription: A lighthouse at dusk
---

Writing small command line tools is a good way to learn a language.

## Getting started

Install the toolchain and create a new project with `cargo new`.
"##;

pub const POST_BETA: &str = r##"---
slug: b
publishedOn: "2024-06-01"
title: Beta Post
summary: Another short summary
type: dev
tags: [rust, web]
imageCredit: Photo by someone on Unsplash
---

Serving a static site needs surprisingly little code, as this post shows.
"##;

pub const POST_JOURNAL: &str = r##"---
slug: on-walking
publishedOn: 2024-03-10
title: On Walking
summary: Notes from a long walk around the lake
type: journal
tags:
  - life
  - rust
---

Some thoughts are easier to have while walking. This is one of them, written down later.
"##;

pub const POST_FRAGMENT: &str = r##"---
slug: tiny-idea
publishedOn: 2024-02-02 08:30:00
title: Tiny idea
summary: A thought that fits in a paragraph
tags: notes
---

Keep a text file with every idea you have, then read it back once a month.
"##;

pub const POST_WITHOUT_TITLE: &str = r##"---
slug: untitled
publishedOn: 2024-04-04
summary: This one forgot its title
tags: []
---

Body.
"##;

pub const POST_BAD_DATE: &str = r##"---
slug: bad
publishedOn: sometime last week
title: Bad date
summary: The date cannot be parsed
---

Body.
"##;

/// Lays out `dev/`, `journal/`, `fragments/` and `assets/` under `root`.
pub fn write_content_tree(root: &Path) -> io::Result<()> {
    for dir in ["dev", "journal", "fragments", "assets"] {
        fs::create_dir_all(root.join(dir))?;
    }

    fs::write(root.join("dev").join("alpha.mdx"), POST_ALPHA)?;
    fs::write(root.join("dev").join("beta.mdx"), POST_BETA)?;
    fs::write(root.join("journal").join("on-walking.mdx"), POST_JOURNAL)?;
    fs::write(root.join("fragments").join("tiny-idea.mdx"), POST_FRAGMENT)?;

    for asset in ["a-cover.png", "b-cover.jpg", "on-walking.webp"] {
        fs::write(root.join("assets").join(asset), b"")?;
    }
    Ok(())
}

/// Two item feed shared by the renderer tests
pub fn create_feed() -> Feed {
    let author = Author {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        link: "https://example.com/".to_string(),
    };

    let first = FeedItem {
        title: "Hello & welcome".to_string(),
        id: "https://example.com/dev/hello".to_string(),
        link: "https://example.com/dev/hello".to_string(),
        description: "First post".to_string(),
        content: Some("<p>Hi</p>".to_string()),
        date: Utc.with_ymd_and_hms(2024, 1, 2, 5, 6, 7).unwrap(),
        categories: vec!["rust".to_string()],
        image: Some(FeedImage {
            url: "https://example.com/assets/hello.png".to_string(),
            width: None,
            height: None,
            thumbnail: "https://example.com/assets/hello.png".to_string(),
            description: Some("A wave".to_string()),
            credit: Some("Photo by Ana & Co".to_string()),
        }),
        author: vec![author.clone()],
        contributor: vec![author.clone()],
    };

    let second = FeedItem {
        title: "Second".to_string(),
        id: "https://example.com/fragments#second".to_string(),
        link: "https://example.com/fragments#second".to_string(),
        description: "Second post".to_string(),
        content: None,
        date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        categories: vec![],
        image: None,
        author: vec![author.clone()],
        contributor: vec![author.clone()],
    };

    Feed {
        title: "my feed".to_string(),
        description: "My blog feed".to_string(),
        id: "https://example.com/".to_string(),
        link: "https://example.com/api/rss".to_string(),
        language: "en".to_string(),
        image: "https://example.com/logo.png".to_string(),
        favicon: "https://example.com/favicon.ico".to_string(),
        copyright: "All rights reserved".to_string(),
        generator: "blogfeed".to_string(),
        feed_links: FeedLinks {
            rss: "https://example.com/api/rss".to_string(),
            json: "https://example.com/api/rss/json".to_string(),
            atom: "https://example.com/api/rss/atom".to_string(),
        },
        author,
        updated: Utc.with_ymd_and_hms(2024, 1, 2, 5, 6, 7).unwrap(),
        categories: vec!["rust".to_string(), "web".to_string()],
        items: vec![first, second],
    }
}
