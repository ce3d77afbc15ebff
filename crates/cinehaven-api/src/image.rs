//! TMDB image CDN URLs.
//!
//! The API returns image path fragments such as `/abc.jpg`; the full URL is
//! `{IMAGE_BASE_URL}/{size}{path}`. Missing paths fall back to a placeholder.

/// Base URL of the TMDB image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Generic placeholder shown when the API has no image.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/500";

/// Rendition width requested from the CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// 500px wide (posters, profile photos).
    W500,
    /// Original upload size (backdrops).
    Original,
}

impl ImageSize {
    /// Returns the CDN path segment for this size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W500 => "w500",
            Self::Original => "original",
        }
    }
}

/// Builds an image URL, or the placeholder when `path` is absent or empty.
#[must_use]
pub fn image_url(size: ImageSize, path: Option<&str>) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{IMAGE_BASE_URL}/{}{p}", size.as_str()),
        _ => String::from(PLACEHOLDER_IMAGE_URL),
    }
}

/// Poster URL (`w500`).
#[must_use]
pub fn poster_url(path: Option<&str>) -> String {
    image_url(ImageSize::W500, path)
}

/// Cast profile photo URL (`w500`).
#[must_use]
pub fn profile_url(path: Option<&str>) -> String {
    image_url(ImageSize::W500, path)
}

/// Backdrop URL (`original`).
#[must_use]
pub fn backdrop_url(path: Option<&str>) -> String {
    image_url(ImageSize::Original, path)
}
