use std::path::Path;

use anyhow::{anyhow, Result};
use gray_matter::{engine::YAML, Matter};
use serde::Deserialize;

use crate::content::Category;

/// Metadata block at the top of every post, exactly as written.
///
/// Every field is optional here; presence of the required ones is checked by
/// [`FrontMatter::require`] so the error can name the missing field.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub slug: Option<String>,
    pub published_on: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<TagField>,
    #[serde(rename = "type")]
    pub category: Option<Category>,
    pub image_description: Option<String>,
    pub image_credit: Option<String>,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum TagField {
    List(Vec<String>),
    Text(String),
}

impl FrontMatter {
    pub fn require<'a>(value: &'a Option<String>, field: &str, file_name: &Path) -> Result<&'a str> {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(anyhow!("Missing required field `{}` in {}", field, file_name.display())),
        }
    }

    /// Tags in first-seen order, without duplicates or blanks
    pub fn tag_list(&self) -> Vec<String> {
        let raw: Vec<String> = match self.tags {
            None => vec![],
            Some(TagField::List(ref tags)) => tags.iter().map(|t| t.trim().to_string()).collect(),
            Some(TagField::Text(ref tags)) => extract_tags(tags),
        };

        let mut tags: Vec<String> = Vec::with_capacity(raw.len());
        for tag in raw {
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }
}

fn extract_tags(tags_str: &str) -> Vec<String> {
    tags_str.split([' ', ','])
        .filter(|x| !x.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Splits a post into its typed metadata and the raw markdown body.
pub fn parse_front_matter(raw_content: &str, file_name: &Path) -> Result<(FrontMatter, String)> {
    let matter = Matter::<YAML>::new();

    let parsed = matter
        .parse::<FrontMatter>(raw_content)
        .map_err(|e| anyhow!("Failed to parse front-matter in {}: {}", file_name.display(), e))?;

    let front_matter = parsed.data
        .ok_or_else(|| anyhow!("No front-matter block found in {}", file_name.display()))?;

    Ok((front_matter, parsed.content))
}
