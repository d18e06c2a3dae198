//! Spritepress
//!
//! A sprite-sheet composition service for Rust: fetches a batch of images,
//! packs them side-by-side into a single composite PNG, and emits CSS rules
//! mapping each input image to its slice of the sheet.
//!
//! # Features
//!
//! - **Concurrent loading**: every image in a batch is fetched and decoded in
//!   parallel, with results reassembled in input order
//! - **Drift-free metadata**: one prefix-sum pass produces both the drawn
//!   geometry and the region descriptors
//! - **Pluggable seams**: byte-source and persistence are traits; HTTP
//!   defaults ship behind the `http` feature
//!
//! # Example
//!
//! ```no_run
//! use spritepress::{SheetBuilder, SheetConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SheetConfig {
//!     timeout_ms: 10000,
//!     ..Default::default()
//! };
//!
//! let builder = SheetBuilder::new(config)?;
//! let urls = vec![
//!     "https://example.com/icons/save.png".to_string(),
//!     "https://example.com/icons/load.png".to_string(),
//! ];
//! let output = builder.build_sheet(&urls)?;
//! println!("sheet: {}x{}", output.layout.width, output.layout.height);
//! print!("{}", output.stylesheet);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use log::info;

pub mod error;
pub use error::{Error, Result};

pub mod source;
pub use source::ByteSource;
#[cfg(feature = "http")]
pub use source::HttpSource;

pub mod loader;
pub use loader::ImageHandle;

pub mod sheet;
pub use sheet::{compose, plan_layout, LayoutDescriptor, Sheet, SheetLayout};

pub mod stylesheet;
pub use stylesheet::render_stylesheet;

pub mod storage;
pub use storage::{DirectoryStore, SheetStore};

// HTTP transport wrapper around the builder
#[cfg(feature = "http")]
pub mod server;

/// Configuration for a [`SheetBuilder`]
///
/// Passed in explicitly at construction; nothing is read from ambient or
/// global state. The defaults are conservative: a 30 second fetch timeout
/// and a `sprite.png` sheet reference in generated CSS.
///
/// # Examples
///
/// ```
/// let cfg = spritepress::SheetConfig::default();
/// assert_eq!(cfg.sheet_ref, "sprite.png");
/// ```
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// User agent string sent with image fetches
    pub user_agent: String,
    /// Per-fetch timeout in milliseconds
    pub timeout_ms: u64,
    /// The image URL generated CSS rules point at
    pub sheet_ref: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("spritepress/{}", env!("CARGO_PKG_VERSION")),
            timeout_ms: 30000,
            sheet_ref: "sprite.png".to_string(),
        }
    }
}

/// Everything one successful build produces: encoded image, CSS text, and
/// the layout both were derived from.
pub struct SheetOutput {
    /// PNG-encoded composite sheet
    pub png: Vec<u8>,
    /// One CSS rule per input image, in input order
    pub stylesheet: String,
    /// Canvas dimensions and per-image slots
    pub layout: SheetLayout,
}

/// The `build_sheet` entry point: synchronous for callers, concurrent inside.
///
/// Owns a tokio runtime for the loader's fan-out and a shared byte-source.
/// Holds no per-request state; a builder can serve any number of batches.
pub struct SheetBuilder {
    runtime: tokio::runtime::Runtime,
    source: Arc<dyn ByteSource>,
    config: SheetConfig,
}

impl SheetBuilder {
    /// Create a builder backed by the default HTTP byte-source.
    #[cfg(feature = "http")]
    pub fn new(config: SheetConfig) -> Result<Self> {
        let source = HttpSource::new(&config.user_agent, config.timeout_ms)?;
        Self::with_source(config, Arc::new(source))
    }

    /// Create a builder over any byte-source implementation.
    pub fn with_source(config: SheetConfig, source: Arc<dyn ByteSource>) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| Error::InitializationError(format!("failed to start runtime: {}", e)))?;
        Ok(Self {
            runtime,
            source,
            config,
        })
    }

    /// Fetch, decode, compose, and render CSS for `identifiers`.
    ///
    /// Fails atomically: any fetch or decode failure aborts the whole batch
    /// and no partial canvas or descriptors are returned. An empty identifier
    /// list is rejected before any fetch is attempted.
    pub fn build_sheet(&self, identifiers: &[String]) -> Result<SheetOutput> {
        if identifiers.is_empty() {
            return Err(Error::InvalidRequest(
                "no image identifiers provided".to_string(),
            ));
        }

        let handles = self
            .runtime
            .block_on(loader::load_batch(Arc::clone(&self.source), identifiers))?;

        let sheet = compose(&handles)?;
        let png = sheet.encode_png()?;
        let stylesheet = render_stylesheet(&sheet.layout.slots, &self.config.sheet_ref);

        info!(
            "built {}x{} sheet from {} images ({} bytes encoded)",
            sheet.width(),
            sheet.height(),
            identifiers.len(),
            png.len()
        );

        Ok(SheetOutput {
            png,
            stylesheet,
            layout: sheet.layout,
        })
    }

    /// The configuration this builder was created with.
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }
}
