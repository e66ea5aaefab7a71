use std::path::Path;

use anyhow::{Context, Result};

use crate::post_list::PostList;

/// Maps a post slug to the public URL of its cover image.
///
/// The assets directory is listed once; file names are kept in lexicographic
/// order so the first match for a slug does not depend on the file system.
pub struct ImageResolver {
    base_url: String,
    file_names: Vec<String>,
}

impl ImageResolver {
    pub fn scan(assets_dir: &Path, base_url: &str) -> Result<ImageResolver> {
        let file_names = PostList::list_file_names(assets_dir)
            .with_context(|| format!("Error listing assets directory {}", assets_dir.display()))?;
        Ok(Self::new(base_url, file_names))
    }

    pub fn new(base_url: &str, mut file_names: Vec<String>) -> ImageResolver {
        file_names.sort();
        ImageResolver {
            base_url: base_url.to_string(),
            file_names,
        }
    }

    /// Empty string when no asset name contains the slug
    pub fn resolve(&self, slug: &str) -> String {
        if slug.is_empty() {
            return String::new();
        }

        match self.file_names.iter().find(|name| name.contains(slug)) {
            Some(name) => format!("{}{}", self.base_url, name),
            None => String::new(),
        }
    }
}
