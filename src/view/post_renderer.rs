use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::Post;

#[derive(ramhorns::Content)]
struct TocItem<'a> {
    anchor: &'a str,
    text: &'a str,
    nested: bool,
}

#[derive(ramhorns::Content)]
struct PostPage<'a> {
    site_title: &'a str,
    slug: &'a str,
    title: &'a str,
    date: &'a str,
    description: &'a str,
    content: &'a str,
    read_time_minutes: usize,
    has_toc: bool,
    toc: Vec<TocItem<'a>>,
    has_collection: bool,
    collection: &'a str,
    collection_title: &'a str,
    collection_description: &'a str,
    collection_index: usize,
    collection_total: usize,
}

#[derive(Debug)]
pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(post_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(post_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    pub fn render(&self, site_title: &str, post: &Post) -> String {
        let toc: Vec<TocItem> = post.toc.iter().map(|entry| TocItem {
            anchor: entry.anchor.as_str(),
            text: entry.text.as_str(),
            nested: entry.level == 3,
        }).collect();

        self.template.render(&PostPage {
            site_title,
            slug: post.slug.as_str(),
            title: post.title.as_str(),
            date: post.date.as_str(),
            description: post.description.as_str(),
            content: post.content.as_str(),
            read_time_minutes: post.read_time_minutes,
            has_toc: !toc.is_empty(),
            toc,
            has_collection: !post.collection.is_empty(),
            collection: post.collection.as_str(),
            collection_title: post.collection_title.as_str(),
            collection_description: post.collection_description.as_str(),
            collection_index: post.collection_index,
            collection_total: post.collection_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::content::{Post, TocEntry};

    use super::*;

    fn sample_post() -> Post {
        Post {
            slug: "sample-post".to_string(),
            title: "Sample Post".to_string(),
            description: "A summary".to_string(),
            date: "March 5, 2024".to_string(),
            raw_date: "2024-03-05".to_string(),
            collection: "samples".to_string(),
            collection_title: "Sample Series".to_string(),
            collection_description: "<p>About samples</p>".to_string(),
            collection_index: 2,
            collection_total: 3,
            content: r#"<h2 id="intro">Intro</h2><p>Body</p>"#.to_string(),
            read_time_minutes: 1,
            toc: vec![TocEntry {
                anchor: "intro".to_string(),
                text: "Intro".to_string(),
                level: 2,
            }],
        }
    }

    #[test]
    fn render_post_page() {
        let template_src = r##"SITE=[{{site_title}}]
TITLE=[{{title}}]
DATE=[{{date}}]
READ=[{{read_time_minutes}} min]
TOC=[{{#toc}}(#{{anchor}} {{text}}){{/toc}}]
PART=[{{#has_collection}}{{collection_title}} {{collection_index}}/{{collection_total}}{{/has_collection}}]
CONTENT=[{{{content}}}]"##;
        let renderer = PostRenderer::new(template_src).unwrap();
        let res = renderer.render("Folio", &sample_post());
        assert_eq!(res, r##"SITE=[Folio]
TITLE=[Sample Post]
DATE=[March 5, 2024]
READ=[1 min]
TOC=[(#intro Intro)]
PART=[Sample Series 2/3]
CONTENT=[<h2 id="intro">Intro</h2><p>Body</p>]"##);
    }

    #[test]
    fn render_post_page_without_collection() {
        let template_src = r##"PART=[{{#has_collection}}{{collection_title}}{{/has_collection}}]"##;
        let renderer = PostRenderer::new(template_src).unwrap();

        let mut post = sample_post();
        post.collection = String::new();
        post.collection_title = String::new();

        let res = renderer.render("Folio", &post);
        assert_eq!(res, "PART=[]");
    }

    #[test]
    fn invalid_template_is_rejected() {
        let err = PostRenderer::new("{{#unclosed}}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
