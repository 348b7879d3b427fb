use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::Collection;

#[derive(ramhorns::Content)]
struct CollectionPage<'a> {
    site_title: &'a str,
    title: &'a str,
    description: &'a str,
    post_list: Vec<MemberItem>,
}

#[derive(ramhorns::Content)]
struct MemberItem {
    link: String,
    title: String,
    date: String,
    description: String,
}

#[derive(ramhorns::Content)]
struct CollectionsPage<'a> {
    site_title: &'a str,
    collection_list: Vec<CollectionItem>,
}

#[derive(ramhorns::Content)]
struct CollectionItem {
    link: String,
    title: String,
    description_text: String,
    post_count: usize,
}

/// Renders a single collection page with its member posts.
pub struct CollectionRenderer<'a> {
    pub template: Template<'a>,
}

impl CollectionRenderer<'_> {
    pub fn new(collection_tpl_src: &str) -> io::Result<CollectionRenderer> {
        let template = match Template::new(collection_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing collection template: {}", e)));
            }
        };

        Ok(CollectionRenderer {
            template,
        })
    }

    pub fn render(&self, site_title: &str, collection: &Collection) -> String {
        let mut post_list = vec![];
        for post in &collection.posts {
            post_list.push(MemberItem {
                link: format!("/post/{}", post.slug),
                title: post.title.clone(),
                date: post.date.clone(),
                description: post.description.clone(),
            });
        }

        self.template.render(&CollectionPage {
            site_title,
            title: collection.title.as_str(),
            description: collection.description.as_str(),
            post_list,
        })
    }
}

/// Renders the listing of every collection.
pub struct CollectionListRenderer<'a> {
    pub template: Template<'a>,
}

impl CollectionListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<CollectionListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing collections template: {}", e)));
            }
        };

        Ok(CollectionListRenderer {
            template,
        })
    }

    pub fn render(&self, site_title: &str, collections: &[Collection]) -> String {
        let mut collection_list = vec![];
        for collection in collections {
            collection_list.push(CollectionItem {
                link: format!("/collection/{}", collection.slug),
                title: collection.title.clone(),
                description_text: collection.description_text.clone(),
                post_count: collection.posts.len(),
            });
        }

        self.template.render(&CollectionsPage {
            site_title,
            collection_list,
        })
    }
}
