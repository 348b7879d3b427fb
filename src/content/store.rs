use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use walkdir::WalkDir;

use crate::content::meta::{extract_body, extract_meta};
use crate::content::toc::index_headings;
use crate::content::{Collection, Post};
use crate::text_utils::{format_display_date, reading_time_minutes, strip_html, today_string};

/// Loads posts and collections straight from the content directories. Every
/// call re-reads the filesystem; entities are rebuilt per request or per
/// export run and never cached.
pub struct ContentStore {
    pub posts_dir: PathBuf,
    pub collections_dir: PathBuf,
}

impl ContentStore {
    pub fn new<P: AsRef<Path>>(posts_dir: P, collections_dir: P) -> Self {
        ContentStore {
            posts_dir: posts_dir.as_ref().to_path_buf(),
            collections_dir: collections_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load_post(&self, slug: &str) -> io::Result<Post> {
        let raw = fs::read_to_string(self.posts_dir.join(format!("{}.html", slug)))?;
        let lines: Vec<&str> = raw.split('\n').collect();

        let body = extract_body(&lines);
        let (content, toc) = index_headings(&body);

        let mut raw_date = extract_meta(&lines, "date");
        if raw_date.is_empty() {
            raw_date = today_string();
        }
        let date = format_display_date(&raw_date);

        let collection = extract_meta(&lines, "collection");
        let mut collection_title = String::new();
        let mut collection_description = String::new();
        let mut collection_index = 0;
        let mut collection_total = 0;
        if !collection.is_empty() {
            // Best effort: the referenced collection file may be missing, in
            // which case the affiliation slug is kept and the rest stays empty
            if let Ok(raw_collection) =
                fs::read_to_string(self.collections_dir.join(format!("{}.html", collection)))
            {
                let collection_lines: Vec<&str> = raw_collection.split('\n').collect();
                collection_title = extract_meta(&collection_lines, "title");
                collection_description = extract_body(&collection_lines).trim().to_string();
            }
            (collection_index, collection_total) = self.collection_position(slug, &collection);
        }

        let mut title = extract_meta(&lines, "title");
        if title.is_empty() {
            title = slug.to_string();
        }

        let read_time_minutes = reading_time_minutes(&content);

        Ok(Post {
            slug: slug.to_string(),
            title,
            description: extract_meta(&lines, "description"),
            date,
            raw_date,
            collection,
            collection_title,
            collection_description,
            collection_index,
            collection_total,
            content,
            read_time_minutes,
            toc,
        })
    }

    pub fn load_collection(&self, slug: &str) -> io::Result<Collection> {
        let raw = fs::read_to_string(self.collections_dir.join(format!("{}.html", slug)))?;
        let lines: Vec<&str> = raw.split('\n').collect();
        let description = extract_body(&lines).trim().to_string();

        let posts = self.load_posts()?;
        let posts: Vec<Post> = posts
            .into_iter()
            .filter(|post| post.collection == slug)
            .collect();

        Ok(Collection {
            slug: slug.to_string(),
            title: extract_meta(&lines, "title"),
            description_text: strip_html(&description),
            description,
            posts,
        })
    }

    /// All posts, newest raw date first. The sort is stable, so posts sharing
    /// a date keep their discovery order.
    pub fn load_posts(&self) -> io::Result<Vec<Post>> {
        let mut posts = Vec::new();
        for slug in html_slugs(&self.posts_dir)? {
            posts.push(self.load_post(&slug)?);
        }

        posts.sort_by(|a, b| b.raw_date.cmp(&a.raw_date));

        Ok(posts)
    }

    pub fn load_collections(&self) -> io::Result<Vec<Collection>> {
        let mut collections = Vec::new();
        for slug in html_slugs(&self.collections_dir)? {
            collections.push(self.load_collection(&slug)?);
        }

        collections.sort_by(|a, b| a.title.cmp(&b.title));

        Ok(collections)
    }

    /// 1-based position of a post among the posts sharing its collection,
    /// ordered by raw date ascending, plus the sibling total. Returns index 0
    /// when the slug is not in the set. Re-scans the posts directory on every
    /// call instead of consulting an index; unreadable entries are skipped.
    pub fn collection_position(&self, slug: &str, collection_slug: &str) -> (usize, usize) {
        let mut siblings: Vec<(String, String)> = Vec::new();

        for entry in WalkDir::new(&self.posts_dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            let Some(sibling_slug) = file_name.strip_suffix(".html") else {
                continue;
            };
            let Ok(raw) = fs::read_to_string(entry.path()) else {
                continue;
            };

            let lines: Vec<&str> = raw.split('\n').collect();
            if extract_meta(&lines, "collection") != collection_slug {
                continue;
            }
            siblings.push((sibling_slug.to_string(), extract_meta(&lines, "date")));
        }

        // Oldest first
        siblings.sort_by(|a, b| a.1.cmp(&b.1));

        let total = siblings.len();
        let index = siblings
            .iter()
            .position(|(sibling, _)| sibling == slug)
            .map(|found| found + 1)
            .unwrap_or(0);

        (index, total)
    }
}

fn html_slugs(dir: &Path) -> io::Result<Vec<String>> {
    let mut slugs = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| {
            io::Error::new(
                ErrorKind::Other,
                format!("Error walking {}: {}", dir.display(), e),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if let Some(slug) = file_name.strip_suffix(".html") {
            slugs.push(slug.to_string());
        }
    }
    Ok(slugs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ContentStore {
        ContentStore::new("res/posts", "res/collections")
    }

    #[test]
    fn test_load_post() {
        let post = store().load_post("borrow-checker").unwrap();
        assert_eq!(post.slug, "borrow-checker");
        assert_eq!(post.title, "Making Peace with the Borrow Checker");
        assert_eq!(post.raw_date, "2024-02-01");
        assert_eq!(post.date, "February 1, 2024");
        assert_eq!(post.description, "Why the compiler keeps rejecting your references.");
        assert_eq!(post.read_time_minutes, 1);
        assert!(post.content.contains(r#"<h2 id="shared-and-exclusive">Shared and Exclusive</h2>"#));
        assert_eq!(post.toc.len(), 2);
    }

    #[test]
    fn test_load_post_collection_fields() {
        let post = store().load_post("borrow-checker").unwrap();
        assert_eq!(post.collection, "rust-notes");
        assert_eq!(post.collection_title, "Rust Notes");
        assert!(post.collection_description.contains("borrow checker"));
        assert_eq!(post.collection_index, 2);
        assert_eq!(post.collection_total, 3);
    }

    #[test]
    fn test_load_post_title_defaults_to_slug() {
        let post = store().load_post("hello-world").unwrap();
        assert_eq!(post.title, "hello-world");
        assert_eq!(post.collection, "");
        assert_eq!(post.collection_index, 0);
        assert_eq!(post.collection_total, 0);
    }

    #[test]
    fn test_load_post_not_found() {
        let err = store().load_post("no-such-post").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_load_posts_newest_first() {
        let posts = store().load_posts().unwrap();
        let slugs: Vec<&str> = posts.iter().map(|post| post.slug.as_str()).collect();
        assert_eq!(slugs, ["lifetimes", "borrow-checker", "first-steps", "hello-world"]);
    }

    #[test]
    fn test_collection_position() {
        let (index, total) = store().collection_position("borrow-checker", "rust-notes");
        assert_eq!((index, total), (2, 3));

        let (first, _) = store().collection_position("first-steps", "rust-notes");
        assert_eq!(first, 1);

        let (missing, total) = store().collection_position("hello-world", "rust-notes");
        assert_eq!(missing, 0);
        assert_eq!(total, 3);
    }

    #[test]
    fn test_load_collection_members_match_global_order() {
        let store = store();
        let collection = store.load_collection("rust-notes").unwrap();
        assert_eq!(collection.title, "Rust Notes");
        assert_eq!(
            collection.description_text,
            "Field notes from learning Rust, one compiler error at a time. Starts with tooling, ends with the borrow checker."
        );

        let members: Vec<&str> = collection.posts.iter().map(|post| post.slug.as_str()).collect();
        let global: Vec<String> = store
            .load_posts()
            .unwrap()
            .into_iter()
            .filter(|post| post.collection == "rust-notes")
            .map(|post| post.slug)
            .collect();
        assert_eq!(members, global.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(members, ["lifetimes", "borrow-checker", "first-steps"]);
    }

    #[test]
    fn test_load_collections_sorted_by_title() {
        let collections = store().load_collections().unwrap();
        let titles: Vec<&str> = collections.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Rust Notes", "Systems Sketches"]);
    }

    #[test]
    fn test_load_collection_not_found() {
        let err = store().load_collection("no-such-collection").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
