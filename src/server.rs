use std::io::ErrorKind;
use std::sync::Arc;

use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::info;

use crate::config::Config;
use crate::pages::{
    content_store, render_collection_page, render_collections_page, render_feed, render_index,
    render_post_page,
};

struct AppState {
    config: Config,
}

fn html_response(body: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Base URL as seen by the client, honoring a proxy's forwarded protocol.
fn request_base_url(req: &HttpRequest) -> String {
    let scheme = match req.headers().get("x-forwarded-proto") {
        Some(proto) if proto.as_bytes() == b"https" => "https",
        _ => "http",
    };
    let host = match req.headers().get("host").and_then(|h| h.to_str().ok()) {
        Some(host) => host,
        None => "localhost",
    };

    format!("{}://{}", scheme, host)
}

#[web::get("/")]
async fn index(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let config = &state.config;

    let rendered = content_store(config)
        .load_posts()
        .and_then(|posts| render_index(config, &posts));

    match rendered {
        Ok(page) => html_response(page),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering index: {}", e)),
    }
}

#[web::get("/post/{slug}")]
async fn view_post(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let slug = path.into_inner();
    let config = &state.config;
    info!("Serving post {}", slug);

    let post = match content_store(config).load_post(&slug) {
        Ok(post) => post,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return web::HttpResponse::NotFound()
                .body(format!("Post {} not found", slug));
        }
        Err(e) => {
            return web::HttpResponse::InternalServerError()
                .body(format!("Error loading post {}: {}", slug, e));
        }
    };

    match render_post_page(config, &post) {
        Ok(page) => html_response(page),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering post {}: {}", slug, e)),
    }
}

#[web::get("/collections")]
async fn collections(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let config = &state.config;

    let rendered = content_store(config)
        .load_collections()
        .and_then(|collections| render_collections_page(config, &collections));

    match rendered {
        Ok(page) => html_response(page),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering collections: {}", e)),
    }
}

#[web::get("/collection/{slug}")]
async fn view_collection(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let slug = path.into_inner();
    let config = &state.config;
    info!("Serving collection {}", slug);

    let collection = match content_store(config).load_collection(&slug) {
        Ok(collection) => collection,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return web::HttpResponse::NotFound()
                .body(format!("Collection {} not found", slug));
        }
        Err(e) => {
            return web::HttpResponse::InternalServerError()
                .body(format!("Error loading collection {}: {}", slug, e));
        }
    };

    match render_collection_page(config, &collection) {
        Ok(page) => html_response(page),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering collection {}: {}", slug, e)),
    }
}

#[web::get("/feed.xml")]
async fn feed(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let config = &state.config;
    let base_url = request_base_url(&req);

    let rendered = content_store(config)
        .load_posts()
        .and_then(|posts| render_feed(config, &base_url, &posts));

    match rendered {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/rss+xml; charset=utf-8")
            .body(xml),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering feed: {}", e)),
    }
}

#[web::get("/robots.txt")]
async fn robots(state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    let file_path = state.config.paths.public_dir.join("robots.txt");
    Ok(NamedFile::open(file_path)?)
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());

    Ok(NamedFile::open(file_path)?)
}

pub async fn server_run(config: Config) -> std::io::Result<()> {
    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    info!("Listening on {}:{}", bind_addr, bind_port);

    let app_state = Arc::new(AppState { config });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(view_post)
            .service(collections)
            .service(view_collection)
            .service(feed)
            .service(robots)
            .service(public_files)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
