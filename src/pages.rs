use std::io::ErrorKind;
use std::{fs, io};

use crate::config::Config;
use crate::content::store::ContentStore;
use crate::content::{Collection, Post};
use crate::view::collection_renderer::{CollectionListRenderer, CollectionRenderer};
use crate::view::list_renderer::ListRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::rss_renderer::RssChannel;

/// The store is rebuilt per call on purpose: both the server and the exporter
/// re-read content from disk on every request or run.
pub fn content_store(config: &Config) -> ContentStore {
    ContentStore::new(&config.paths.posts_dir, &config.paths.collections_dir)
}

pub fn read_template(config: &Config, file_name: &str) -> io::Result<String> {
    fs::read_to_string(config.paths.template_dir.join(file_name))
}

pub fn render_index(config: &Config, posts: &[Post]) -> io::Result<String> {
    let template_src = read_template(config, "index.tpl")?;
    let renderer = ListRenderer::new(&template_src)?;
    Ok(renderer.render(&config.site.title, posts))
}

pub fn render_post_page(config: &Config, post: &Post) -> io::Result<String> {
    let template_src = read_template(config, "post.tpl")?;
    let renderer = PostRenderer::new(&template_src)?;
    Ok(renderer.render(&config.site.title, post))
}

pub fn render_collections_page(config: &Config, collections: &[Collection]) -> io::Result<String> {
    let template_src = read_template(config, "collections.tpl")?;
    let renderer = CollectionListRenderer::new(&template_src)?;
    Ok(renderer.render(&config.site.title, collections))
}

pub fn render_collection_page(config: &Config, collection: &Collection) -> io::Result<String> {
    let template_src = read_template(config, "collection.tpl")?;
    let renderer = CollectionRenderer::new(&template_src)?;
    Ok(renderer.render(&config.site.title, collection))
}

pub fn render_feed(config: &Config, base_url: &str, posts: &[Post]) -> io::Result<Vec<u8>> {
    let channel = RssChannel {
        ch_title: &config.site.title,
        ch_link: base_url,
        ch_desc: &config.site.description,
    };

    match channel.render(posts) {
        Ok(xml) => Ok(xml),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidData, format!("Error rendering feed: {}", e))),
    }
}
