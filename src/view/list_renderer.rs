use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::Post;

#[derive(ramhorns::Content)]
struct IndexPage<'a> {
    site_title: &'a str,
    post_list: Vec<PostItem>,
}

#[derive(ramhorns::Content)]
struct PostItem {
    link: String,
    title: String,
    date: String,
    description: String,
    read_time_minutes: usize,
    in_collection: bool,
    collection_title: String,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
        })
    }

    pub fn render(&self, site_title: &str, posts: &[Post]) -> String {
        let mut post_list = vec![];
        for post in posts {
            post_list.push(PostItem {
                link: format!("/post/{}", post.slug),
                title: post.title.clone(),
                date: post.date.clone(),
                description: post.description.clone(),
                read_time_minutes: post.read_time_minutes,
                in_collection: !post.collection.is_empty(),
                collection_title: post.collection_title.clone(),
            });
        }

        self.template.render(&IndexPage {
            site_title,
            post_list,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::content::Post;

    use super::*;

    fn post(slug: &str, title: &str, date: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: title.to_string(),
            description: String::new(),
            date: date.to_string(),
            raw_date: String::new(),
            collection: String::new(),
            collection_title: String::new(),
            collection_description: String::new(),
            collection_index: 0,
            collection_total: 0,
            content: String::new(),
            read_time_minutes: 1,
            toc: vec![],
        }
    }

    #[test]
    fn render_index() {
        let template_src = "{{#post_list}}[{{link}} {{title}} {{date}}]{{/post_list}}";
        let renderer = ListRenderer::new(template_src).unwrap();
        let posts = vec![
            post("second", "Second", "February 1, 2024"),
            post("first", "First", "January 1, 2024"),
        ];
        let res = renderer.render("Folio", &posts);
        assert_eq!(res, "[/post/second Second February 1, 2024][/post/first First January 1, 2024]");
    }

    #[test]
    fn render_empty_index() {
        let template_src = "SITE=[{{site_title}}]{{#post_list}}x{{/post_list}}";
        let renderer = ListRenderer::new(template_src).unwrap();
        let res = renderer.render("Folio", &[]);
        assert_eq!(res, "SITE=[Folio]");
    }
}
