use chrono::{DateTime, Utc};

use crate::config::{Author, Config, SectionText, Site};
use crate::content::{Category, Post, Section};

#[derive(Debug, Clone, PartialEq)]
pub struct FeedLinks {
    pub rss: String,
    pub json: String,
    pub atom: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub thumbnail: String,
    pub description: Option<String>,
    pub credit: Option<String>,
}

impl FeedImage {
    /// Description and credit as one line, `description (credit)` when both are set
    pub fn caption(&self) -> Option<String> {
        match (&self.description, &self.credit) {
            (Some(description), Some(credit)) => Some(format!("{} ({})", description, credit)),
            (Some(text), None) | (None, Some(text)) => Some(text.clone()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub id: String,
    pub link: String,
    pub description: String,
    pub content: Option<String>,
    pub date: DateTime<Utc>,
    pub categories: Vec<String>,
    pub image: Option<FeedImage>,
    pub author: Vec<Author>,
    pub contributor: Vec<Author>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    pub title: String,
    pub description: String,
    pub id: String,
    pub link: String,
    pub language: String,
    pub image: String,
    pub favicon: String,
    pub copyright: String,
    pub generator: String,
    pub feed_links: FeedLinks,
    pub author: Author,
    pub updated: DateTime<Utc>,
    pub categories: Vec<String>,
    pub items: Vec<FeedItem>,
}

pub struct FeedBuilder<'a> {
    pub config: &'a Config,
}

impl<'a> FeedBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        FeedBuilder { config }
    }

    /// Builds the feed of one section. Posts are taken as they are, in order.
    pub fn build(&self, posts: &[Post], section: Section) -> Feed {
        let site = &self.config.site;
        let author = &self.config.author;
        let text = self.section_text(section);

        let mut categories: Vec<String> = vec![];
        let mut items = Vec::with_capacity(posts.len());
        for post in posts {
            for tag in post.tags.iter() {
                if !categories.contains(tag) {
                    categories.push(tag.clone());
                }
            }
            items.push(self.build_item(post));
        }

        let updated = posts.iter()
            .map(|p| p.date)
            .max()
            .unwrap_or_else(Utc::now);

        Feed {
            title: text.title,
            description: text.description,
            id: site.url.clone(),
            link: section_link(&site.rss_link, section),
            language: site.language.clone(),
            image: site.image.clone(),
            favicon: site.favicon.clone(),
            copyright: site.copyright.clone(),
            generator: site.generator.clone(),
            feed_links: FeedLinks {
                rss: section_link(&site.rss_link, section),
                json: section_link(&site.json_link, section),
                atom: section_link(&site.atom_link, section),
            },
            author: author.clone(),
            updated,
            categories,
            items,
        }
    }

    fn build_item(&self, post: &Post) -> FeedItem {
        let link = post_link(&self.config.site, post);
        let image = if post.image.is_empty() {
            None
        } else {
            Some(FeedImage {
                url: post.image.clone(),
                width: None,
                height: None,
                thumbnail: post.image.clone(),
                description: post.image_description.clone(),
                credit: post.image_credit.clone(),
            })
        };

        FeedItem {
            title: post.title.clone(),
            id: link.clone(),
            link,
            description: post.summary.clone(),
            content: post.content.clone(),
            date: post.date,
            categories: post.tags.clone(),
            image,
            author: vec![self.config.author.clone()],
            contributor: vec![self.config.author.clone()],
        }
    }

    fn section_text(&self, section: Section) -> SectionText {
        match self.config.feeds.sections.get(section.stem()) {
            Some(text) => text.clone(),
            None => default_section_text(&self.config.site, section),
        }
    }
}

pub fn default_section_text(site: &Site, section: Section) -> SectionText {
    let (suffix, description) = match section {
        Section::Combined => return SectionText {
            title: site.title.clone(),
            description: site.description.clone(),
        },
        Section::Category(Category::Dev) => ("Dev", "Software development articles and tutorials"),
        Section::Category(Category::Journal) => ("Journal", "Personal journal entries and reflections on life"),
        Section::Category(Category::Fragment) => ("Fragments", "Short notes, snippets and passing thoughts"),
        Section::Category(Category::Cuisine) => ("Cuisine", "Recipes and notes from the kitchen"),
    };

    SectionText {
        title: format!("{} | {}", site.title, suffix),
        description: description.to_string(),
    }
}

/// `<site>/fragments#<slug>` for fragments, `<site>/<type>/<slug>` otherwise
pub fn post_link(site: &Site, post: &Post) -> String {
    let base_url = site.url.trim_end_matches('/');
    match post.category {
        Category::Fragment => format!("{}/{}#{}", base_url, Category::Fragment.dir_name(), post.slug),
        other => format!("{}/{}/{}", base_url, other.name(), post.slug),
    }
}

fn section_link(base: &str, section: Section) -> String {
    match section {
        Section::Combined => base.to_string(),
        Section::Category(_) => format!("{}/{}", base.trim_end_matches('/'), section.stem()),
    }
}
