//! Image association and bitmap preloading.
//!
//! An item named "Blue Jay" looks for a resource keyed `blue-jay`. The
//! catalog maps those keys to files found in an images directory. The cache
//! is an explicit object owned by whoever runs the session; nothing here is
//! global.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::infrastructure::traits::{Bitmap, BitmapDecoder, FileSystem};

/// File extensions considered images.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "gif"];

/// Lowercase, hyphen-joined form of a name.
///
/// Words break on anything that is not a letter or digit, between a
/// lowercase letter or digit and a following uppercase letter, and before
/// the last capital of an acronym run ("HTMLParser" → "html-parser").
pub fn kebab_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let lower_to_upper = (prev.is_lowercase() || prev.is_numeric()) && c.is_uppercase();
            let acronym_end =
                prev.is_uppercase() && c.is_uppercase() && next.is_some_and(char::is_lowercase);
            if lower_to_upper || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.iter().map(|w| w.to_lowercase()).join("-")
}

/// Mapping from kebab-case resource key to image file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetCatalog {
    entries: BTreeMap<String, PathBuf>,
}

impl AssetCatalog {
    /// Key every image path by its kebab-cased file stem. Non-images are ignored.
    pub fn from_paths<I: IntoIterator<Item = PathBuf>>(paths: I) -> Self {
        let entries = paths
            .into_iter()
            .filter(|p| is_image(p))
            .filter_map(|p| {
                let stem = p.file_stem()?.to_string_lossy().to_string();
                Some((kebab_case(&stem), p))
            })
            .collect();
        Self { entries }
    }

    /// Scan a directory for images. A missing directory is an empty catalog.
    #[instrument(level = "debug", skip(fs))]
    pub fn scan(fs: &dyn FileSystem, dir: &Path) -> ApplicationResult<Self> {
        if !fs.is_dir(dir) {
            debug!("no image directory at {}", dir.display());
            return Ok(Self::default());
        }
        let files = fs.list_files(dir).with_path_context("scan images", dir)?;
        let catalog = Self::from_paths(files);
        debug!("found {} images", catalog.len());
        Ok(catalog)
    }

    /// Image for the item called `name`, if one exists.
    pub fn image_for(&self, name: &str) -> Option<&Path> {
        self.entries.get(&kebab_case(name)).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.values().map(PathBuf::as_path)
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Decoded bitmaps by resource path.
#[derive(Debug, Default)]
pub struct BitmapCache {
    entries: HashMap<PathBuf, Arc<Bitmap>>,
}

impl BitmapCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<Arc<Bitmap>> {
        self.entries.get(path).cloned()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn insert(&mut self, path: PathBuf, bitmap: Bitmap) {
        self.entries.insert(path, Arc::new(bitmap));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Session-scoped cancellation switch shared with the preloader.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Progress after one asset has been attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadProgress {
    pub loaded: usize,
    pub total: usize,
    pub last: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadOutcome {
    /// Every asset was attempted; `failed` of them could not be decoded
    Completed { total: usize, failed: usize },
    /// Stopped early; no completion is signalled
    Cancelled { processed: usize },
}

/// Sequential fetch-and-decode of every image in a catalog.
pub struct Preloader {
    fs: Arc<dyn FileSystem>,
    decoder: Arc<dyn BitmapDecoder>,
}

impl Preloader {
    pub fn new(fs: Arc<dyn FileSystem>, decoder: Arc<dyn BitmapDecoder>) -> Self {
        Self { fs, decoder }
    }

    /// Load every catalog image into `cache`, reporting after each one.
    ///
    /// Failures are skipped but still count as processed. Cached entries are
    /// not fetched again. Once `cancel` is set no further callbacks fire and
    /// the outcome is [`PreloadOutcome::Cancelled`]; whatever was decoded
    /// stays in the cache.
    #[instrument(level = "debug", skip_all, fields(total = catalog.len()))]
    pub fn preload_all<F>(
        &self,
        catalog: &AssetCatalog,
        cache: &mut BitmapCache,
        cancel: &CancelFlag,
        mut on_progress: F,
    ) -> PreloadOutcome
    where
        F: FnMut(&PreloadProgress),
    {
        let total = catalog.len();
        let mut loaded = 0;
        let mut failed = 0;

        for path in catalog.paths() {
            if cancel.is_cancelled() {
                return PreloadOutcome::Cancelled { processed: loaded };
            }

            if !cache.contains(path) {
                match self.load(path) {
                    Ok(bitmap) => cache.insert(path.to_path_buf(), bitmap),
                    Err(e) => {
                        debug!("skipping {}: {}", path.display(), e);
                        failed += 1;
                    }
                }
            }
            loaded += 1;

            if cancel.is_cancelled() {
                return PreloadOutcome::Cancelled { processed: loaded };
            }
            on_progress(&PreloadProgress {
                loaded,
                total,
                last: path.to_path_buf(),
            });
        }

        PreloadOutcome::Completed { total, failed }
    }

    /// Bitmap for `path`, decoded and cached on first use. `None` when the
    /// file cannot be read or decoded.
    pub fn fetch(&self, path: &Path, cache: &mut BitmapCache) -> Option<Arc<Bitmap>> {
        if let Some(bitmap) = cache.get(path) {
            return Some(bitmap);
        }
        match self.load(path) {
            Ok(bitmap) => {
                cache.insert(path.to_path_buf(), bitmap);
                cache.get(path)
            }
            Err(e) => {
                debug!("cannot decode {}: {}", path.display(), e);
                None
            }
        }
    }

    fn load(&self, path: &Path) -> Result<Bitmap, String> {
        let bytes = self.fs.read(path).map_err(|e| e.to_string())?;
        self.decoder.decode(&bytes)
    }
}
