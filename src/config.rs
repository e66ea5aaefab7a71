use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::content::Category;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Paths {
    pub content_dir: PathBuf,
    /// Relative paths are resolved against `content_dir`
    pub assets_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            content_dir: PathBuf::from("."),
            assets_dir: PathBuf::from("assets"),
            out_dir: PathBuf::from("out"),
        }
    }
}

impl Paths {
    pub fn assets_path(&self) -> PathBuf {
        self.content_dir.join(&self.assets_dir)
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Site {
    pub url: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub image: String,
    pub favicon: String,
    pub copyright: String,
    pub generator: String,
    pub rss_link: String,
    pub json_link: String,
    pub atom_link: String,
    pub asset_base_url: String,
}

impl Default for Site {
    fn default() -> Self {
        Site {
            url: "https://www.laudebugs.me/".to_string(),
            title: "Lau de Bugs' Blog".to_string(),
            description: "Life and Software Development Blog".to_string(),
            language: "en".to_string(),
            image: "https://www.laudebugs.me/images/logos/logo_light.png".to_string(),
            favicon: "https://www.laudebugs.me/favicon.ico".to_string(),
            copyright: "All rights reserved 2021, Lau de Bugs".to_string(),
            generator: "blogfeed".to_string(),
            rss_link: "https://www.laudebugs.me/api/rss".to_string(),
            json_link: "https://www.laudebugs.me/api/rss/json".to_string(),
            atom_link: "https://www.laudebugs.me/api/rss/atom".to_string(),
            asset_base_url: "https://raw.githubusercontent.com/lbugasu/blog-posts/main/assets/".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Author {
    pub name: String,
    pub email: String,
    pub link: String,
}

impl Default for Author {
    fn default() -> Self {
        Author {
            name: "Laurence B. Ininda".to_string(),
            email: "lbugasu@gmail.com".to_string(),
            link: "https://www.laudebugs.me/".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Archive {
    pub categories: Vec<Category>,
    /// Look up the last commit date of every archived post
    pub last_modified: bool,
}

impl Default for Archive {
    fn default() -> Self {
        Archive {
            categories: vec![Category::Dev],
            last_modified: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SectionText {
    pub title: String,
    pub description: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Feeds {
    /// One feed file is written per category in this list
    pub categories: Vec<Category>,
    /// Categories merged into the combined `feed.json`
    pub combined: Vec<Category>,
    /// Title and description overrides keyed by section stem (`dev`, `fragments`, `feed`, ...)
    pub sections: HashMap<String, SectionText>,
}

impl Default for Feeds {
    fn default() -> Self {
        Feeds {
            categories: vec![Category::Dev, Category::Journal, Category::Fragment],
            combined: vec![Category::Dev, Category::Journal],
            sections: HashMap::new(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub site: Site,
    pub author: Author,
    pub archive: Archive,
    pub feeds: Feeds,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe()?;
        let exe_dir = cur_exe.parent().unwrap_or_else(|| Path::new("."));
        let rest = path.strip_prefix("${exe_dir}").unwrap_or(&path);
        Ok(exe_dir.join(rest))
    } else {
        Ok(path)
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir)?,
        assets_dir: parse_path(cfg.paths.assets_dir)?,
        out_dir: parse_path(cfg.paths.out_dir)?,
    };

    if let Some(ref mut log) = cfg.log {
        if let Some(location) = log.location.take() {
            log.location = Some(parse_path(location)?);
        }
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.paths.out_dir, PathBuf::from("out"));
        assert_eq!(cfg.archive.categories, vec![Category::Dev]);
        assert_eq!(cfg.feeds.combined, vec![Category::Dev, Category::Journal]);
        assert_eq!(cfg.author.name, "Laurence B. Ininda");
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r##"
[paths]
content_dir = "blog-posts"

[site]
url = "https://example.com/"

[archive]
categories = ["dev", "journal"]
last_modified = false

[feeds.sections.dev]
title = "Dev notes"
description = "Only code"

[log]
level = "Debug"
log_to_console = true
"##;
        let cfg = parse_config(toml_str).unwrap();
        assert_eq!(cfg.paths.content_dir, PathBuf::from("blog-posts"));
        assert_eq!(cfg.paths.assets_path(), PathBuf::from("blog-posts").join("assets"));
        assert_eq!(cfg.site.url, "https://example.com/");
        assert_eq!(cfg.site.title, "Lau de Bugs' Blog");
        assert_eq!(cfg.archive.categories, vec![Category::Dev, Category::Journal]);
        assert!(!cfg.archive.last_modified);
        assert_eq!(cfg.feeds.sections["dev"].title, "Dev notes");
        assert!(cfg.log.unwrap().log_to_console);
    }

    #[test]
    fn test_exe_dir_is_expanded() {
        let toml_str = r##"
[paths]
out_dir = "${exe_dir}/out"

[log]
level = "Info"
log_to_console = false
location = "${exe_dir}/log/blogfeed.log"
"##;
        let cfg = parse_config(toml_str).unwrap();
        let exe_dir = env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(cfg.paths.out_dir, exe_dir.join("out"));
        assert_eq!(cfg.log.unwrap().location, Some(exe_dir.join("log").join("blogfeed.log")));
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[archive]\ncategories = [\"poetry\"]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().starts_with("Error parsing configuration file"));
    }
}
