pub mod config;
pub mod logger;
pub mod content;
pub mod aggregator;
pub mod archive;
pub mod feed;
pub mod feed_writer;
pub mod check;
pub mod pipeline;
pub mod util;
mod post_list;
mod text_utils;
mod view;
mod test_data;
