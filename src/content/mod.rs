use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

pub mod front_matter;
pub mod image_resolver;
pub mod markdown_renderer;
pub mod post_loader;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dev,
    Journal,
    #[serde(alias = "fragments")]
    Fragment,
    Cuisine,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Dev, Category::Journal, Category::Fragment, Category::Cuisine];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Dev => "dev",
            Category::Journal => "journal",
            Category::Fragment => "fragment",
            Category::Cuisine => "cuisine",
        }
    }

    /// Directory holding the posts of this category, relative to the content root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Fragment => "fragments",
            other => other.name(),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Target of a feed: one category, or every category merged together.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Section {
    Category(Category),
    Combined,
}

impl Section {
    pub fn stem(&self) -> &'static str {
        match self {
            Section::Category(category) => category.dir_name(),
            Section::Combined => "feed",
        }
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stem())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(skip)]
    pub file_name: PathBuf,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub published_on: String,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_credit: Option<String>,
    pub image: String,
    #[serde(serialize_with = "serialize_date")]
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, type={}, date={}, title={}",
               self.slug,
               self.category,
               self.published_on,
               self.title
        )
    }
}

fn serialize_date<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}
