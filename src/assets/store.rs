use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::assets::decode::{decode_image, rasterize_svg};
use crate::foundation::error::{ReelError, ReelResult};

#[derive(Clone, Debug)]
/// Prepared raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

#[derive(Clone, Debug)]
/// Font file used for all text shaping and drawing.
pub struct FontAsset {
    /// Where the font came from (file path or system family name).
    pub source: String,
    /// Raw font file bytes.
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a font collection.
    pub index: u32,
}

/// Images and the text font available to scenes, keyed by name.
///
/// File paths are resolved against a root directory and must be relative to it.
#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    root: PathBuf,
    images: BTreeMap<String, PreparedImage>,
    font: Option<FontAsset>,
}

impl AssetStore {
    /// Store without a root, images or font.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Store resolving file paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Root directory for relative asset paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register an already decoded image under `key`.
    pub fn insert_image(&mut self, key: impl Into<String>, image: PreparedImage) {
        self.images.insert(key.into(), image);
    }

    /// Read, decode and register the image at `source` under `key`.
    ///
    /// `.svg` files are rasterized; everything else goes through the `image` decoders.
    #[tracing::instrument(skip(self))]
    pub fn load_image(&mut self, key: &str, source: &str) -> ReelResult<()> {
        let norm = normalize_rel_path(source)?;
        let bytes = self.read_bytes(&norm)?;
        let image = if norm.to_ascii_lowercase().ends_with(".svg") {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            rasterize_svg(&bytes, Arc::new(db))?
        } else {
            decode_image(&bytes)?
        };
        tracing::debug!(key, width = image.width, height = image.height, "image loaded");
        self.images.insert(key.to_owned(), image);
        Ok(())
    }

    /// Image registered under `key`.
    pub fn image(&self, key: &str) -> Option<&PreparedImage> {
        self.images.get(key)
    }

    /// Return `true` when an image is registered under `key`.
    pub fn has_image(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    /// Read a font file at `source` and use it for all text.
    pub fn load_font(&mut self, source: &str) -> ReelResult<()> {
        let norm = normalize_rel_path(source)?;
        let bytes = self.read_bytes(&norm)?;
        self.set_font(FontAsset {
            source: norm,
            bytes: Arc::new(bytes),
            index: 0,
        });
        Ok(())
    }

    /// Use the system's default sans-serif face for text.
    ///
    /// Returns `false` when no system font could be found.
    pub fn load_system_font(&mut self) -> bool {
        match find_system_sans() {
            Some(font) => {
                tracing::debug!(source = %font.source, "using system font");
                self.set_font(font);
                true
            }
            None => false,
        }
    }

    /// Replace the text font.
    pub fn set_font(&mut self, font: FontAsset) {
        self.font = Some(font);
    }

    /// Text font, if any.
    pub fn font(&self) -> Option<&FontAsset> {
        self.font.as_ref()
    }

    fn read_bytes(&self, norm_path: &str) -> ReelResult<Vec<u8>> {
        let path = self.root.join(Path::new(norm_path));
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(ReelError::from)
    }
}

fn find_system_sans() -> Option<FontAsset> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let families = [
        usvg::fontdb::Family::SansSerif,
        usvg::fontdb::Family::Name("DejaVu Sans"),
        usvg::fontdb::Family::Name("Liberation Sans"),
        usvg::fontdb::Family::Name("Arial"),
    ];
    let query = usvg::fontdb::Query {
        families: &families,
        ..Default::default()
    };
    let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
    let source = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| "system".to_owned());
    db.with_face_data(id, |data, index| FontAsset {
        source,
        bytes: Arc::new(data.to_vec()),
        index,
    })
}

/// Normalize and validate asset paths relative to the store root.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> ReelResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ReelError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(ReelError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ReelError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ReelError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
