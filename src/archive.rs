use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spdlog::{error, info, warn};

use crate::content::Post;
use crate::util::git_date::LastModified;
use crate::util::json_file::{to_pretty_json, write_file};

pub const ARCHIVE_FILE: &str = "archive.json";

pub struct ArchiveWriter<'a> {
    pub out_dir: &'a Path,
    pub last_modified: Option<&'a dyn LastModified>,
}

impl<'a> ArchiveWriter<'a> {
    /// Writes `<out_dir>/archive.json`. Failures are logged, never returned.
    pub fn write(&self, posts: Vec<Post>) {
        let posts = self.enrich(posts);
        match self.store(&posts) {
            Ok(path) => info!("Successfully updated archive {} ({} posts)", path.display(), posts.len()),
            Err(e) => error!("Error updating the archive: {:#}", e),
        }
    }

    fn enrich(&self, mut posts: Vec<Post>) -> Vec<Post> {
        let Some(lookup) = self.last_modified else {
            return posts;
        };

        for post in posts.iter_mut() {
            match lookup.last_modified(post.category, &post.slug) {
                Ok(date) => post.last_modified = Some(date),
                Err(e) => warn!("No last modified date for {}/{}: {:#}", post.category, post.slug, e),
            }
        }
        posts
    }

    fn store(&self, posts: &[Post]) -> Result<PathBuf> {
        let json = to_pretty_json(posts).context("Error serializing archive")?;
        let path = self.out_dir.join(ARCHIVE_FILE);
        write_file(&path, &json)
            .with_context(|| format!("Error writing {}", path.display()))?;
        Ok(path)
    }
}
