use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use spdlog::info;
use walkdir::WalkDir;

use crate::config::Config;
use crate::pages::{
    content_store, render_collection_page, render_collections_page, render_feed, render_index,
    render_post_page,
};

/// Renders the whole site into the output directory. The same pipeline that
/// backs the live server runs once, sequentially, to completion.
pub fn export_site(config: &Config, base_url: &str) -> io::Result<()> {
    let out_dir = config.output_dir();

    // Start from a clean tree; a missing directory is fine
    let _ = fs::remove_dir_all(&out_dir);
    fs::create_dir_all(&out_dir)?;

    let store = content_store(config);
    let posts = store.load_posts()?;
    let collections = store.load_collections()?;

    info!("Building index.html");
    fs::write(out_dir.join("index.html"), render_index(config, &posts)?)?;

    for post in &posts {
        let post_dir = out_dir.join("post").join(&post.slug);
        fs::create_dir_all(&post_dir)?;
        info!("Building post/{}/index.html", post.slug);
        fs::write(post_dir.join("index.html"), render_post_page(config, post)?)?;
    }

    info!("Building collections/index.html");
    let collections_dir = out_dir.join("collections");
    fs::create_dir_all(&collections_dir)?;
    fs::write(collections_dir.join("index.html"), render_collections_page(config, &collections)?)?;

    for collection in &collections {
        let collection_dir = out_dir.join("collection").join(&collection.slug);
        fs::create_dir_all(&collection_dir)?;
        info!("Building collection/{}/index.html", collection.slug);
        fs::write(collection_dir.join("index.html"), render_collection_page(config, collection)?)?;
    }

    info!("Building feed.xml");
    fs::write(out_dir.join("feed.xml"), render_feed(config, base_url, &posts)?)?;

    info!("Copying public assets");
    copy_dir(&config.paths.public_dir, &out_dir.join("public"))?;

    // Crawlers expect robots.txt at the root of the exported tree
    let robots = config.paths.public_dir.join("robots.txt");
    if robots.exists() {
        fs::copy(robots, out_dir.join("robots.txt"))?;
    }

    info!("Build complete, output in {}", out_dir.display());
    Ok(())
}

fn copy_dir(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| {
            io::Error::new(
                ErrorKind::Other,
                format!("Error walking {}: {}", src.display(), e),
            )
        })?;
        let rel_path = entry.path().strip_prefix(src).map_err(|e| {
            io::Error::new(
                ErrorKind::InvalidData,
                format!("Error resolving {}: {}", entry.path().display(), e),
            )
        })?;

        let target = dst.join(rel_path);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
