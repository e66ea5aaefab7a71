use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use spdlog::{error, info};

use crate::content::Section;
use crate::feed::Feed;
use crate::util::json_file::{to_pretty_json, write_file};
use crate::view::atom_renderer::AtomFeed;
use crate::view::json_feed_renderer::render_json_feed;
use crate::view::rss_renderer::RssChannel;

/// The three renditions of a feed, as stored in `<section>.json`
#[derive(Serialize, Debug)]
pub struct FeedStore {
    pub rss: String,
    pub json: String,
    pub atom: String,
}

impl FeedStore {
    pub fn render(feed: &Feed) -> Result<FeedStore> {
        let rss = RssChannel { feed }.render().context("Error rendering RSS")?;
        let atom = AtomFeed { feed }.render().context("Error rendering Atom")?;
        let json = render_json_feed(feed).context("Error rendering JSON feed")?;

        Ok(FeedStore {
            rss: String::from_utf8(rss).context("RSS is not valid UTF-8")?,
            json,
            atom: String::from_utf8(atom).context("Atom is not valid UTF-8")?,
        })
    }
}

pub struct FeedWriter<'a> {
    pub out_dir: &'a Path,
}

impl<'a> FeedWriter<'a> {
    pub fn feed_path(&self, section: Section) -> PathBuf {
        self.out_dir.join(format!("{}.json", section.stem()))
    }

    /// Writes `<out_dir>/<section>.json`. Failures are logged, never returned.
    pub fn write(&self, feed: &Feed, section: Section) {
        match self.store(feed, section) {
            Ok(path) => info!("Successfully updated {} feeds in {}", section, path.display()),
            Err(e) => error!("Error updating the {} feeds: {:#}", section, e),
        }
    }

    fn store(&self, feed: &Feed, section: Section) -> Result<PathBuf> {
        let store = FeedStore::render(feed)?;
        let json = to_pretty_json(&store).context("Error serializing feeds")?;
        let path = self.feed_path(section);
        write_file(&path, &json)
            .with_context(|| format!("Error writing {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::Value;

    use crate::content::Category;
    use crate::test_data::create_feed;

    use super::*;

    #[test]
    fn test_write_feed() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let out_dir = dir.path().join("out");
        let writer = FeedWriter { out_dir: &out_dir };
        let feed = create_feed();

        writer.write(&feed, Section::Category(Category::Fragment));
        let path = out_dir.join("fragments.json");
        assert_eq!(writer.feed_path(Section::Category(Category::Fragment)), path);

        let raw = fs::read_to_string(&path)?;
        assert!(raw.starts_with("{\n    \"rss\": "));
        let value: Value = serde_json::from_str(&raw)?;
        assert!(value["rss"].as_str().unwrap().starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?><rss"));
        assert!(value["atom"].as_str().unwrap().contains("<feed xmlns=\"http://www.w3.org/2005/Atom\">"));

        let json_feed: Value = serde_json::from_str(value["json"].as_str().unwrap())?;
        assert_eq!(json_feed["title"], "my feed");
        Ok(())
    }

    #[test]
    fn test_combined_feed_path() {
        let out_dir = PathBuf::from("out");
        let writer = FeedWriter { out_dir: &out_dir };
        assert_eq!(writer.feed_path(Section::Combined), PathBuf::from("out").join("feed.json"));
    }

    #[test]
    fn test_image_details_reach_every_rendition() -> Result<()> {
        let mut feed = create_feed();
        if let Some(ref mut image) = feed.items[0].image {
            image.description = Some("Sunset over the lake".to_string());
            image.credit = Some("Photo by Kim".to_string());
        }

        let store = FeedStore::render(&feed)?;
        for (name, rendition) in [("rss", &store.rss), ("json", &store.json), ("atom", &store.atom)] {
            assert!(rendition.contains("Sunset over the lake"), "description missing from {}", name);
            assert!(rendition.contains("Photo by Kim"), "credit missing from {}", name);
        }
        Ok(())
    }

    #[test]
    fn test_write_failure_is_swallowed() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let out_dir = dir.path().join("out");
        fs::write(&out_dir, "")?;

        FeedWriter { out_dir: &out_dir }.write(&create_feed(), Section::Combined);
        assert!(out_dir.is_file());
        Ok(())
    }
}
