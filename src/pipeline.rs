use std::collections::HashMap;

use anyhow::Result;
use spdlog::{info, warn};

use crate::aggregator::aggregate;
use crate::archive::ArchiveWriter;
use crate::check::{check_posts, Violation};
use crate::config::Config;
use crate::content::image_resolver::ImageResolver;
use crate::content::post_loader::PostLoader;
use crate::content::{Category, Post, Section};
use crate::feed::FeedBuilder;
use crate::feed_writer::FeedWriter;
use crate::util::git_date::{GitLastModified, LastModified};

/// Runs the archive and feed generation for one content tree.
pub struct Pipeline<'a> {
    config: &'a Config,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Pipeline { config }
    }

    fn image_resolver(&self) -> Result<ImageResolver> {
        ImageResolver::scan(&self.config.paths.assets_path(), &self.config.site.asset_base_url)
    }

    /// Writes `archive.json` for the configured archive categories.
    pub fn write_archive(&self) -> Result<()> {
        let images = self.image_resolver()?;
        let loader = PostLoader::new(&self.config.paths.content_dir, &images);

        let mut batches = vec![];
        for category in self.config.archive.categories.iter() {
            batches.push(loader.load_posts(*category, false)?);
        }
        let posts = aggregate(batches);

        let git = GitLastModified::new(self.config.paths.content_dir.clone());
        let last_modified: Option<&dyn LastModified> = if self.config.archive.last_modified {
            Some(&git)
        } else {
            None
        };

        let writer = ArchiveWriter {
            out_dir: &self.config.paths.out_dir,
            last_modified,
        };
        writer.write(posts);
        Ok(())
    }

    /// Writes one feed file per configured category, then the combined `feed.json`.
    pub fn write_feeds(&self) -> Result<()> {
        let images = self.image_resolver()?;
        let loader = PostLoader::new(&self.config.paths.content_dir, &images);
        let feeds = &self.config.feeds;

        let mut loaded: HashMap<Category, Vec<Post>> = HashMap::new();
        for category in feeds.categories.iter().chain(feeds.combined.iter()) {
            if !loaded.contains_key(category) {
                loaded.insert(*category, loader.load_posts(*category, true)?);
            }
        }

        let builder = FeedBuilder::new(self.config);
        let writer = FeedWriter { out_dir: &self.config.paths.out_dir };

        for category in feeds.categories.iter() {
            let section = Section::Category(*category);
            let posts = aggregate(vec![loaded.get(category).cloned().unwrap_or_default()]);
            writer.write(&builder.build(&posts, section), section);
        }

        let batches = feeds.combined.iter()
            .map(|category| loaded.get(category).cloned().unwrap_or_default())
            .collect();
        let posts = aggregate(batches);
        writer.write(&builder.build(&posts, Section::Combined), Section::Combined);

        Ok(())
    }

    /// Loads every category present on disk and applies the content rules.
    pub fn check(&self) -> Result<Vec<Violation>> {
        let images = self.image_resolver()?;
        let loader = PostLoader::new(&self.config.paths.content_dir, &images);

        let mut violations = vec![];
        for category in Category::ALL {
            let dir = self.config.paths.content_dir.join(category.dir_name());
            if !dir.is_dir() {
                warn!("Skipping {}: {} does not exist", category, dir.display());
                continue;
            }

            let posts = loader.load_posts(category, true)?;
            info!("Checked {} {} posts", posts.len(), category);
            violations.extend(check_posts(&posts));
        }
        Ok(violations)
    }
}
