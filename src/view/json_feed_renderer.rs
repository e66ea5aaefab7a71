use chrono::SecondsFormat;
use serde::Serialize;

use crate::config::Author;
use crate::feed::{Feed, FeedImage, FeedItem};
use crate::util::json_file::to_pretty_json;

const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1";

#[derive(Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    home_page_url: &'a str,
    feed_url: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    icon: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    favicon: &'a str,
    author: JsonAuthor<'a>,
    items: Vec<JsonItem<'a>>,
}

#[derive(Serialize)]
struct JsonAuthor<'a> {
    name: &'a str,
    url: &'a str,
}

#[derive(Serialize)]
struct JsonItem<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_html: Option<&'a str>,
    url: &'a str,
    title: &'a str,
    summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    #[serde(rename = "_media", skip_serializing_if = "Option::is_none")]
    media: Option<JsonMedia<'a>>,
    date_modified: String,
    date_published: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<JsonAuthor<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<&'a str>,
}

/// Custom extension, JSON Feed has no field for image size or credit
#[derive(Serialize)]
struct JsonMedia<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    thumbnail: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    credit: Option<&'a str>,
}

impl<'a> From<&'a FeedImage> for JsonMedia<'a> {
    fn from(image: &'a FeedImage) -> Self {
        JsonMedia {
            thumbnail: &image.thumbnail,
            width: image.width,
            height: image.height,
            description: image.description.as_deref(),
            credit: image.credit.as_deref(),
        }
    }
}

impl<'a> From<&'a Author> for JsonAuthor<'a> {
    fn from(author: &'a Author) -> Self {
        JsonAuthor {
            name: &author.name,
            url: &author.link,
        }
    }
}

impl<'a> From<&'a FeedItem> for JsonItem<'a> {
    fn from(item: &'a FeedItem) -> Self {
        let date = item.date.to_rfc3339_opts(SecondsFormat::Millis, true);
        JsonItem {
            id: &item.id,
            content_html: item.content.as_deref(),
            url: &item.link,
            title: &item.title,
            summary: &item.description,
            image: item.image.as_ref().map(|i| i.url.as_str()),
            media: item.image.as_ref().map(JsonMedia::from),
            date_modified: date.clone(),
            date_published: date,
            author: item.author.first().map(JsonAuthor::from),
            tags: item.categories.iter().map(String::as_str).collect(),
        }
    }
}

/// Renders the feed as JSON Feed version 1
pub fn render_json_feed(feed: &Feed) -> serde_json::Result<String> {
    let json_feed = JsonFeed {
        version: JSON_FEED_VERSION,
        title: &feed.title,
        home_page_url: &feed.link,
        feed_url: &feed.feed_links.json,
        description: &feed.description,
        icon: &feed.image,
        favicon: &feed.favicon,
        author: JsonAuthor::from(&feed.author),
        items: feed.items.iter().map(JsonItem::from).collect(),
    };

    to_pretty_json(&json_feed)
}
