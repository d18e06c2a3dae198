//! Thin HTTP transport around [`SheetBuilder`](crate::SheetBuilder).
//!
//! Exposes the original service surface: `POST /createSprite` builds and
//! stores a sheet, `GET /sprites/{name}` serves stored sheets. All real work
//! happens in the library; this module only parses requests, maps errors to
//! status codes, and writes responses.

use std::io::Read;
use std::path::PathBuf;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use tiny_http::{Header, Method, Response, Server};
use url::Url;

use crate::storage::{timestamped_name, DirectoryStore, SheetStore};
use crate::stylesheet::render_stylesheet;
use crate::{Error, Result, SheetBuilder, SheetConfig};

/// Server configuration, passed in explicitly — nothing comes from globals.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Directory stored sheets are written to and served from
    pub sprites_dir: PathBuf,
    /// Base URL sprite locators are joined onto in responses
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            sprites_dir: PathBuf::from("sprites"),
            public_base_url: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Deserialize)]
struct CreateSpriteRequest {
    #[serde(rename = "imageUrls")]
    image_urls: Vec<String>,
}

#[derive(Serialize)]
struct CreateSpriteResponse {
    #[serde(rename = "spriteUrl")]
    sprite_url: String,
    css: String,
}

/// HTTP status for a pipeline error.
fn status_for(err: &Error) -> u16 {
    match err {
        Error::InvalidRequest(_) | Error::EmptyBatch => 400,
        Error::DecodeFailure { .. } => 422,
        Error::SourceUnavailable { .. } => 502,
        _ => 500,
    }
}

/// Extract a servable file name from a `/sprites/{name}` path.
///
/// Anything that could step outside the sprites directory is refused.
fn sprite_file_name(path: &str) -> Option<&str> {
    let name = path.strip_prefix("/sprites/")?;
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return None;
    }
    Some(name)
}

fn header(value: &str) -> Header {
    // Only called with well-formed static header text
    value.parse().unwrap()
}

fn cors_headers() -> Vec<Header> {
    vec![
        header("Access-Control-Allow-Origin: *"),
        header("Access-Control-Allow-Methods: GET, POST, OPTIONS"),
        header("Access-Control-Allow-Headers: Content-Type"),
    ]
}

/// Run the sprite service until the process is killed.
///
/// Requests are accepted on a single loop; each `createSprite` call runs its
/// own internally concurrent pipeline.
pub fn serve(server_config: ServerConfig, sheet_config: SheetConfig) -> Result<()> {
    let base_url = Url::parse(&server_config.public_base_url)
        .map_err(|e| Error::InitializationError(format!("bad public base URL: {}", e)))?;

    let builder = SheetBuilder::new(sheet_config)?;
    let store = DirectoryStore::new(&server_config.sprites_dir);

    let server = Server::http(("0.0.0.0", server_config.port))
        .map_err(|e| Error::InitializationError(format!("failed to bind: {}", e)))?;
    info!(
        "serving on port {} (sprites dir {:?})",
        server_config.port, server_config.sprites_dir
    );

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let path = request.url().to_string();

        let response = match (&method, path.as_str()) {
            (Method::Options, _) => Response::from_string("").with_status_code(204),
            (Method::Post, "/createSprite") => {
                let mut body = String::new();
                if request.as_reader().read_to_string(&mut body).is_err() {
                    Response::from_string("Invalid image URLs").with_status_code(400)
                } else {
                    match handle_create(&builder, &store, &base_url, &body) {
                        Ok(resp) => {
                            let json = serde_json::to_string(&resp)
                                .unwrap_or_else(|_| "{}".to_string());
                            Response::from_string(json)
                                .with_header(header("Content-Type: application/json"))
                        }
                        Err(e) => {
                            warn!("createSprite failed: {}", e);
                            Response::from_string(e.to_string()).with_status_code(status_for(&e))
                        }
                    }
                }
            }
            (Method::Get, p) => match sprite_file_name(p) {
                Some(name) => match std::fs::read(server_config.sprites_dir.join(name)) {
                    Ok(bytes) => Response::from_data(bytes)
                        .with_header(header("Content-Type: image/png")),
                    Err(_) => Response::from_string("Not Found").with_status_code(404),
                },
                None => Response::from_string("Not Found").with_status_code(404),
            },
            _ => Response::from_string("Not Found").with_status_code(404),
        };

        let mut response = response;
        for h in cors_headers() {
            response = response.with_header(h);
        }
        if let Err(e) = request.respond(response) {
            error!("failed to write response for {} {}: {}", method, path, e);
        }
    }

    Ok(())
}

fn handle_create(
    builder: &SheetBuilder,
    store: &DirectoryStore,
    base_url: &Url,
    body: &str,
) -> Result<CreateSpriteResponse> {
    let request: CreateSpriteRequest = serde_json::from_str(body)
        .map_err(|_| Error::InvalidRequest("Invalid image URLs".to_string()))?;

    let output = builder.build_sheet(&request.image_urls)?;
    let locator = store.store(&output.png, &timestamped_name())?;

    let sprite_url = base_url
        .join(&format!("sprites/{}", locator))
        .map_err(|e| Error::StoreFailed(format!("unusable locator '{}': {}", locator, e)))?;

    // The stored name is only known after the store step, so the CSS handed
    // to HTTP clients is rendered here against the served URL rather than
    // the builder's local sheet_ref.
    let css = render_stylesheet(&output.layout.slots, sprite_url.as_str());

    Ok(CreateSpriteResponse {
        sprite_url: sprite_url.to_string(),
        css,
    })
}
