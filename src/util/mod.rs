pub mod git_date;
pub mod json_file;
