use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use blogfeed::config::{read_config, Config};

use crate::CFG_FILE_NAME;

const CONFIG_SAMPLE: &str = include_str!("../../../blogfeed.toml");

fn get_config_path() -> Option<PathBuf> {
    let mut candidates = vec![];
    if let Some(exe_dir) = env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        candidates.push(exe_dir.join(CFG_FILE_NAME));
    }
    if let Ok(cur_dir) = env::current_dir() {
        candidates.push(cur_dir.join(CFG_FILE_NAME));
    }
    if let Some(cfg_dir) = dirs::config_dir() {
        candidates.push(cfg_dir.join(CFG_FILE_NAME));
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Reads the given config file, or the first `blogfeed.toml` found next to the
/// executable, in the current directory or in the user config directory.
/// Falls back to the defaults when there is none.
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(get_config_path) {
        Some(path) => path,
        None => {
            println!("No {} found, using defaults", CFG_FILE_NAME);
            return Ok(Config::default());
        }
    };

    println!("Reading config from {}", config_path.display());
    let config = read_config(&config_path)?;
    Ok(config)
}

pub(crate) fn write_sample_cfg(file_path: &Path) -> Result<()> {
    if file_path.exists() {
        anyhow::bail!("{} already exists", file_path.display());
    }

    let file = File::create(file_path)
        .with_context(|| format!("Error creating {}", file_path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(CONFIG_SAMPLE.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use blogfeed::config::parse_config;
    use blogfeed::content::Category;

    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let cfg = parse_config(CONFIG_SAMPLE).unwrap();
        assert_eq!(cfg.feeds.categories, vec![Category::Dev, Category::Journal, Category::Fragment]);
        assert_eq!(cfg.site.asset_base_url, Config::default().site.asset_base_url);
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_write_sample_cfg() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(CFG_FILE_NAME);
        write_sample_cfg(&path)?;
        assert!(write_sample_cfg(&path).is_err());

        let cfg = read_config(&path)?;
        assert!(cfg.archive.last_modified);
        Ok(())
    }
}
