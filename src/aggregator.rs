use crate::content::Post;

/// Merges post batches into one list, newest first, numbered from the oldest.
///
/// Posts sharing a date keep the order in which they were passed in. The
/// oldest post gets `no = 1` and the newest `no = len`.
pub fn aggregate(batches: Vec<Vec<Post>>) -> Vec<Post> {
    let mut posts: Vec<Post> = batches.into_iter().flatten().collect();
    posts.sort_by(|a, b| b.date.cmp(&a.date));

    let count = posts.len();
    for (idx, post) in posts.iter_mut().enumerate() {
        post.no = Some(count - idx);
    }
    posts
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::{TimeZone, Utc};

    use crate::content::Category;

    use super::*;

    fn create_post(slug: &str, y: i32, m: u32, d: u32) -> Post {
        Post {
            file_name: PathBuf::from(format!("dev/{}.mdx", slug)),
            title: format!("Title of {}", slug),
            slug: slug.to_string(),
            summary: format!("Summary of post {}", slug),
            published_on: format!("{}-{:02}-{:02}", y, m, d),
            tags: vec![],
            category: Category::Dev,
            image_description: None,
            image_credit: None,
            image: "".to_string(),
            date: Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(),
            content: None,
            no: None,
            last_modified: None,
        }
    }

    fn summary(posts: &[Post]) -> Vec<(&str, usize)> {
        posts.iter().map(|p| (p.slug.as_str(), p.no.unwrap())).collect()
    }

    #[test]
    fn test_two_single_post_lists() {
        let a = create_post("a", 2024, 1, 1);
        let b = create_post("b", 2024, 6, 1);

        let posts = aggregate(vec![vec![a], vec![b]]);
        assert_eq!(summary(&posts), [("b", 2), ("a", 1)]);
    }

    #[test]
    fn test_numbers_are_dense_and_unique() {
        let batch1 = vec![create_post("x", 2023, 5, 1), create_post("y", 2021, 1, 9)];
        let batch2 = vec![create_post("z", 2022, 7, 3), create_post("w", 2024, 2, 29)];

        let posts = aggregate(vec![batch1, batch2]);
        assert_eq!(summary(&posts), [("w", 4), ("x", 3), ("z", 2), ("y", 1)]);
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let batch = vec![
            create_post("first", 2024, 3, 3),
            create_post("second", 2024, 3, 3),
            create_post("older", 2020, 1, 1),
        ];

        let posts = aggregate(vec![batch]);
        assert_eq!(summary(&posts), [("first", 3), ("second", 2), ("older", 1)]);
    }

    #[test]
    fn test_empty() {
        assert!(aggregate(vec![]).is_empty());
        assert!(aggregate(vec![vec![], vec![]]).is_empty());
    }
}
