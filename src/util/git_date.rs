use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use crate::content::Category;
use crate::text_utils::format_display_date;

/// Source of the "last modified" date shown in the archive.
pub trait LastModified {
    fn last_modified(&self, category: Category, slug: &str) -> Result<String>;
}

/// Asks git for the date of the last commit touching `<category dir>/<slug>.mdx`.
pub struct GitLastModified {
    pub repo_dir: PathBuf,
}

impl GitLastModified {
    pub fn new(repo_dir: PathBuf) -> Self {
        GitLastModified { repo_dir }
    }

    fn parse_git_date(output: &str, file: &str) -> Result<String> {
        let output = output.trim();
        if output.is_empty() {
            bail!("No git history for {}", file);
        }

        let date = NaiveDate::parse_from_str(output, "%Y-%m-%d")
            .with_context(|| format!("Unexpected git date {} for {}", output, file))?;
        Ok(format_display_date(&date))
    }
}

impl LastModified for GitLastModified {
    fn last_modified(&self, category: Category, slug: &str) -> Result<String> {
        let file = format!("{}/{}.mdx", category.dir_name(), slug);
        let output = Command::new("git")
            .current_dir(&self.repo_dir)
            .args(["log", "-1", "--format=%ad", "--date=short", "--"])
            .arg(&file)
            .output()
            .context("Error running git")?;

        if !output.status.success() {
            bail!("git log failed for {}: {}", file, String::from_utf8_lossy(&output.stderr).trim());
        }

        Self::parse_git_date(&String::from_utf8_lossy(&output.stdout), &file)
    }
}
