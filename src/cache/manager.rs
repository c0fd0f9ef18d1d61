//! Disk-backed photo cache
//!
//! Provides an `ImageCache` that maps a photo URL to a blob on disk and
//! falls back to a single network fetch on a miss.

use directories::ProjectDirs;
use futures::future::join_all;
use log::{debug, warn};
use reqwest::{Client, Url};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::data::FetchError;

/// Name of the cache directory inside the platform cache root
const CACHE_DIR_NAME: &str = "RecipeImageCache";

/// Returns the cache key for a URL: the hex-encoded SHA-256 of the URL string.
///
/// The key is used verbatim as the file name, so the same URL always lands
/// on the same file across runs.
pub fn cache_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

/// Fetch-through cache for recipe photos
///
/// Photos are stored as raw bytes in a single directory (on Linux,
/// `~/.cache/cuisine/RecipeImageCache/`). There is no expiry, size bound or
/// eviction. Concurrent lookups for the same unseen URL are not coalesced:
/// each one fetches and writes, and the last write wins.
#[derive(Debug, Clone)]
pub struct ImageCache {
    /// Directory where cached photos are stored
    cache_dir: PathBuf,
    /// HTTP client used on a cache miss
    client: Client,
}

impl ImageCache {
    /// Creates a new ImageCache in the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "cuisine")?;
        let cache_dir = project_dirs.cache_dir().join(CACHE_DIR_NAME);
        Some(Self::with_dir(cache_dir))
    }

    /// Creates a new ImageCache rooted at a custom directory
    ///
    /// The directory is created if it does not exist yet; failure to create
    /// it is logged and surfaces later as cache misses.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        if let Err(e) = fs::create_dir_all(&cache_dir) {
            warn!("Could not create cache directory {}: {}", cache_dir.display(), e);
        }
        Self {
            cache_dir,
            client: Client::new(),
        }
    }

    /// Replaces the HTTP client used on a cache miss
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Directory holding the cached photos
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path of the cache file for a URL
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.cache_dir.join(cache_key(url))
    }

    /// Returns the cached bytes for a URL without going to the network
    ///
    /// A file that exists but is not a recognisable image is treated as a miss.
    pub fn cached(&self, url: &str) -> Option<Vec<u8>> {
        let bytes = fs::read(self.path_for(url)).ok()?;
        if image::guess_format(&bytes).is_err() {
            debug!("Ignoring unreadable cache entry for {}", url);
            return None;
        }
        Some(bytes)
    }

    /// Returns the photo at `url`, from disk if present, else from the network
    ///
    /// On a miss the photo is fetched once and written to disk. The write is
    /// best-effort: a failed write is logged and the bytes are still returned.
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - The photo bytes
    /// * `Err(FetchError::InvalidUrl)` - `url` is not an absolute URL
    /// * `Err(FetchError::InvalidResponse)` - The server answered with a non-2xx status
    /// * `Err(FetchError::InvalidData)` - The body is not a recognisable image
    pub async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl)?;

        if let Some(bytes) = self.cached(url) {
            debug!("Cache hit for {}", url);
            return Ok(bytes);
        }
        debug!("Cache miss for {}", url);

        let response = self.client.get(parsed).send().await?;
        if !response.status().is_success() {
            debug!("Photo request for {} returned {}", url, response.status());
            return Err(FetchError::InvalidResponse);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|_| FetchError::InvalidResponse)?;
        if image::guess_format(&bytes).is_err() {
            return Err(FetchError::InvalidData);
        }

        let path = self.path_for(url);
        if let Err(e) = fs::write(&path, &bytes) {
            warn!("Could not write cache entry {}: {}", path.display(), e);
        }

        Ok(bytes.to_vec())
    }

    /// Warms the cache for many URLs concurrently
    ///
    /// Results are returned in the same order as `urls`.
    pub async fn prefetch<'a, I>(&self, urls: I) -> Vec<(String, Result<usize, FetchError>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lookups = urls.into_iter().map(|url| async move {
            let result = self.get(url).await.map(|bytes| bytes.len());
            (url.to_string(), result)
        });
        join_all(lookups).await
    }

    /// Deletes every cached photo
    ///
    /// The directory is removed and recreated, so it exists and is empty
    /// afterwards. A missing directory is not an error; any other failure
    /// to remove it is returned and the entries stay on disk.
    pub fn clear(&self) -> std::io::Result<()> {
        match fs::remove_dir_all(&self.cache_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Cache directory {} already gone", self.cache_dir.display());
            }
            Err(e) => return Err(e),
        }
        fs::create_dir_all(&self.cache_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Smallest byte prefix `image::guess_format` recognises as PNG
    const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn create_test_cache() -> (ImageCache, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = ImageCache::with_dir(temp_dir.path().to_path_buf());
        (cache, temp_dir)
    }

    #[test]
    fn test_cache_key_is_deterministic() {
        let url = "https://example.com/photo.jpg";
        assert_eq!(cache_key(url), cache_key(url));
    }

    #[test]
    fn test_cache_key_differs_per_url() {
        assert_ne!(
            cache_key("https://example.com/a.jpg"),
            cache_key("https://example.com/b.jpg")
        );
    }

    #[test]
    fn test_cache_key_is_hex_sha256() {
        let key = cache_key("https://example.com/photo.jpg");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        // SHA-256 of the empty string
        assert_eq!(
            cache_key(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_path_for_uses_key_as_file_name() {
        let (cache, temp_dir) = create_test_cache();
        let url = "https://example.com/photo.jpg";
        assert_eq!(cache.path_for(url), temp_dir.path().join(cache_key(url)));
    }

    #[test]
    fn test_with_dir_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_path = temp_dir.path().join("nested").join("cache");
        let cache = ImageCache::with_dir(nested_path.clone());

        assert!(nested_path.is_dir(), "Nested directory should be created");
        assert_eq!(cache.dir(), nested_path.as_path());
    }

    #[test]
    fn test_cached_returns_none_for_missing_key() {
        let (cache, _temp_dir) = create_test_cache();
        assert!(cache.cached("https://example.com/missing.jpg").is_none());
    }

    #[test]
    fn test_cached_returns_stored_bytes() {
        let (cache, _temp_dir) = create_test_cache();
        let url = "https://example.com/photo.png";
        fs::write(cache.path_for(url), PNG_BYTES).expect("Should write file");

        assert_eq!(cache.cached(url).as_deref(), Some(PNG_BYTES));
    }

    #[test]
    fn test_cached_ignores_non_image_entry() {
        let (cache, _temp_dir) = create_test_cache();
        let url = "https://example.com/photo.png";
        fs::write(cache.path_for(url), b"not an image").expect("Should write file");

        assert!(cache.cached(url).is_none());
    }

    #[test]
    fn test_clear_removes_entries_and_keeps_directory() {
        let (cache, temp_dir) = create_test_cache();
        let entry = temp_dir.path().join("test.png");
        fs::write(&entry, PNG_BYTES).expect("Should write file");

        cache.clear().expect("Clear should succeed");

        assert!(!entry.exists(), "Entry should be removed");
        assert!(temp_dir.path().is_dir(), "Cache directory should exist");
        let remaining = fs::read_dir(temp_dir.path()).expect("Should list dir").count();
        assert_eq!(remaining, 0, "Cache directory should be empty");
    }

    #[test]
    fn test_clear_recreates_missing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache_path = temp_dir.path().join("cache");
        let cache = ImageCache::with_dir(cache_path.clone());
        fs::remove_dir_all(&cache_path).expect("Should remove dir");

        cache.clear().expect("Clear should succeed");

        assert!(cache_path.is_dir());
    }

    #[test]
    fn test_clear_reports_failure_to_remove() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache_path = temp_dir.path().join("cache");
        let cache = ImageCache::with_dir(cache_path.clone());
        // A regular file where the directory should be cannot be removed as a directory
        fs::remove_dir_all(&cache_path).expect("Should remove dir");
        fs::write(&cache_path, PNG_BYTES).expect("Should create blocking file");

        let result = cache.clear();

        assert!(result.is_err(), "Clear should surface the remove failure");
        assert_eq!(fs::read(&cache_path).expect("File should remain"), PNG_BYTES);
    }

    #[test]
    fn test_new_creates_xdg_compliant_path() {
        if let Some(cache) = ImageCache::new() {
            let path_str = cache.dir().to_string_lossy();
            assert!(path_str.contains("cuisine"), "Cache path should contain project name");
            assert!(path_str.ends_with(CACHE_DIR_NAME));
        }
        // Test passes if new() returns None (e.g., no home directory in CI)
    }

    #[tokio::test]
    async fn test_get_rejects_invalid_url() {
        let (cache, _temp_dir) = create_test_cache();
        let result = cache.get("not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_get_serves_cached_entry_without_network() {
        let (cache, _temp_dir) = create_test_cache();
        // Port 9 (discard) on localhost: any real request would fail
        let url = "http://127.0.0.1:9/photo.png";
        fs::write(cache.path_for(url), PNG_BYTES).expect("Should write file");

        let bytes = cache.get(url).await.expect("Cache hit should succeed");

        assert_eq!(bytes, PNG_BYTES);
    }
}
