use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spdlog::debug;

use crate::content::front_matter::{parse_front_matter, FrontMatter};
use crate::content::image_resolver::ImageResolver;
use crate::content::markdown_renderer::MarkdownRenderer;
use crate::content::{Category, Post};
use crate::post_list::PostList;
use crate::text_utils::parse_date_time;

pub struct PostLoader<'a> {
    pub content_dir: &'a Path,
    pub images: &'a ImageResolver,
}

impl<'a> PostLoader<'a> {
    pub fn new(content_dir: &'a Path, images: &'a ImageResolver) -> Self {
        PostLoader { content_dir, images }
    }

    /// Loads every post of a category, newest first.
    ///
    /// The first unreadable or malformed file aborts the whole load.
    pub fn load_posts(&self, category: Category, include_content: bool) -> Result<Vec<Post>> {
        let root_dir = self.content_dir.join(category.dir_name());
        let post_list = PostList { root_dir: root_dir.clone() };
        let files = post_list.retrieve_files()
            .with_context(|| format!("Error listing posts in {}", root_dir.display()))?;

        let mut posts = Vec::with_capacity(files.len());
        for file_name in files {
            let raw_content = fs::read_to_string(&file_name)
                .with_context(|| format!("Error reading post {}", file_name.display()))?;
            let post = self.parse_post(&file_name, &raw_content, category, include_content)?;
            debug!("Loaded post {}", post);
            posts.push(post);
        }

        // Stable: posts sharing a date keep file name order
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    pub fn parse_post(&self, file_name: &PathBuf, raw_content: &str, category: Category, include_content: bool) -> Result<Post> {
        let (fm, body) = parse_front_matter(raw_content, file_name)?;

        let slug = FrontMatter::require(&fm.slug, "slug", file_name)?.to_string();
        let title = FrontMatter::require(&fm.title, "title", file_name)?.to_string();
        let summary = FrontMatter::require(&fm.summary, "summary", file_name)?.to_string();
        let published_on = FrontMatter::require(&fm.published_on, "publishedOn", file_name)?.to_string();

        let date = parse_date_time(&published_on)
            .map_err(|e| anyhow::anyhow!("{} - file={}", e, file_name.display()))?;

        let content = if include_content {
            let html = MarkdownRenderer::render(&body)
                .with_context(|| format!("Error rendering post {}", file_name.display()))?;
            Some(html)
        } else {
            None
        };

        let image = self.images.resolve(&slug);
        let tags = fm.tag_list();

        Ok(Post {
            file_name: file_name.clone(),
            title,
            slug,
            summary,
            published_on,
            tags,
            category: fm.category.unwrap_or(category),
            image_description: fm.image_description,
            image_credit: fm.image_credit,
            image,
            date,
            content,
            no: None,
            last_modified: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::test_data::{write_content_tree, ASSET_BASE, POST_ALPHA, POST_BAD_DATE, POST_WITHOUT_TITLE};

    use super::*;

    #[test]
    fn test_load_posts_newest_first() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_content_tree(dir.path())?;
        let images = ImageResolver::scan(&dir.path().join("assets"), ASSET_BASE)?;
        let loader = PostLoader::new(dir.path(), &images);

        let posts = loader.load_posts(Category::Dev, false)?;
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["b", "a"]);
        assert!(posts.iter().all(|p| p.content.is_none()));
        assert!(posts.iter().all(|p| p.no.is_none()));

        let alpha = &posts[1];
        assert_eq!(alpha.date, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(alpha.image, format!("{}a-cover.png", ASSET_BASE));
        assert_eq!(alpha.tags, ["rust", "cli"]);
        assert_eq!(alpha.category, Category::Dev);
        Ok(())
    }

    #[test]
    fn test_load_posts_with_content() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_content_tree(dir.path())?;
        let images = ImageResolver::scan(&dir.path().join("assets"), ASSET_BASE)?;
        let loader = PostLoader::new(dir.path(), &images);

        let posts = loader.load_posts(Category::Fragment, true)?;
        assert_eq!(posts.len(), 1);
        let fragment = &posts[0];
        assert_eq!(fragment.category, Category::Fragment);
        assert_eq!(fragment.image, "");
        let content = fragment.content.as_deref().unwrap();
        assert!(content.starts_with("<p>"));
        assert!(content.len() >= 50);
        Ok(())
    }

    #[test]
    fn test_underscore_files_are_ignored() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_content_tree(dir.path())?;
        fs::write(dir.path().join("dev").join("_template.mdx"), "not even front-matter")?;
        let images = ImageResolver::new(ASSET_BASE, vec![]);
        let loader = PostLoader::new(dir.path(), &images);

        assert_eq!(loader.load_posts(Category::Dev, false)?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_missing_category_dir() {
        let dir = tempfile::tempdir().unwrap();
        let images = ImageResolver::new(ASSET_BASE, vec![]);
        let loader = PostLoader::new(dir.path(), &images);

        let err = loader.load_posts(Category::Cuisine, false).unwrap_err();
        assert!(err.to_string().starts_with("Error listing posts in"));
    }

    #[test]
    fn test_malformed_post_fails_the_load() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_content_tree(dir.path())?;
        fs::write(dir.path().join("journal").join("untitled.mdx"), POST_WITHOUT_TITLE)?;
        let images = ImageResolver::new(ASSET_BASE, vec![]);
        let loader = PostLoader::new(dir.path(), &images);

        let err = loader.load_posts(Category::Journal, false).unwrap_err();
        assert!(err.to_string().contains("Missing required field `title`"));
        Ok(())
    }

    #[test]
    fn test_bad_date() {
        let images = ImageResolver::new(ASSET_BASE, vec![]);
        let loader = PostLoader::new(Path::new("."), &images);
        let file_name = PathBuf::from("dev/bad.mdx");

        let err = loader.parse_post(&file_name, POST_BAD_DATE, Category::Dev, false).unwrap_err();
        assert!(err.to_string().contains("file=dev/bad.mdx"));

        let post = loader.parse_post(&file_name, POST_ALPHA, Category::Journal, false).unwrap();
        // explicit `type` wins over the directory
        assert_eq!(post.category, Category::Dev);
    }
}
