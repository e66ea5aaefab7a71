use std::path::{Path, PathBuf};
use std::{fs, io};

const POST_EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Lists the post files of one category directory.
pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    /// Post files sorted by file name. Names starting with `_` (drafts,
    /// partials) or `.` are skipped, as is anything that is not a regular
    /// `.mdx`/`.md` file.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        for file_name in Self::list_file_names(&self.root_dir)? {
            if file_name.starts_with('_') {
                continue;
            }

            let path = self.root_dir.join(&file_name);
            let is_post = path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| POST_EXTENSIONS.contains(&ext))
                .unwrap_or(false);
            if is_post {
                posts.push(path);
            }
        }
        Ok(posts)
    }

    /// Names of the regular, non-hidden files of a directory, sorted.
    pub fn list_file_names(dir: &Path) -> io::Result<Vec<String>> {
        let mut names = vec![];
        let entries = fs::read_dir(dir)?;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(file_name) = entry.file_name().to_str() {
                if !file_name.starts_with('.') {
                    names.push(file_name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieve_files() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        for name in ["b-post.mdx", "a-post.md", "_draft.mdx", ".DS_Store", "notes.txt"] {
            fs::write(dir.path().join(name), b"")?;
        }
        fs::create_dir(dir.path().join("folder.mdx"))?;

        let post_list = PostList { root_dir: dir.path().to_path_buf() };
        let files = post_list.retrieve_files()?;
        assert_eq!(files, vec![dir.path().join("a-post.md"), dir.path().join("b-post.mdx")]);
        Ok(())
    }

    #[test]
    fn test_missing_dir() {
        let post_list = PostList { root_dir: PathBuf::from("does/not/exist") };
        let err = post_list.retrieve_files().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
