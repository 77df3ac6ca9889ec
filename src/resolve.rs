use reqwest::Url;

use crate::ImgurError;
use crate::client::API_BASE_URL;

/// A resolved download target: the identifier extracted from an input URL plus the
/// kind of Imgur resource it names.
///
/// Albums are recognized by the `/a/` marker in the path (`imgur.com/a/<id>`); any
/// other path is treated as a single-image reference and normalized to a one-entry
/// album by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// An album, fetched via the album-images endpoint.
    Album { id: String },
    /// A single image, fetched via the image endpoint.
    Image { id: String },
}

impl Target {
    /// The identifier extracted from the input URL.
    pub fn id(&self) -> &str {
        match self {
            Target::Album { id } | Target::Image { id } => id,
        }
    }

    /// Whether this target names an album.
    pub fn is_album(&self) -> bool {
        matches!(self, Target::Album { .. })
    }

    /// The API resource path for this target, relative to the v3 base URL.
    pub(crate) fn request_path(&self) -> String {
        match self {
            Target::Album { id } => format!("album/{id}/images"),
            Target::Image { id } => format!("image/{id}"),
        }
    }
}

/// Resolve a user-supplied Imgur URL into a [`Target`].
///
/// The identifier is the final non-empty path segment of the input. A path with an
/// `a` segment ahead of the identifier (the `/a/<id>` album form) resolves as an
/// album; everything else resolves as a single image.
///
/// # Errors
///
/// Returns [`ImgurError::InvalidInput`] naming the offending input when it does not
/// parse as a URL, has no non-empty path segment, or composes into an unparseable
/// API endpoint. The endpoint check runs against the canonical Imgur API base; a
/// client configured with a custom base URL joins (and re-validates) the path
/// against its own base when each request is built. No network access happens here.
pub fn resolve(input: &str) -> Result<Target, ImgurError> {
    let invalid = || ImgurError::InvalidInput(input.to_string());

    let url = Url::parse(input).map_err(|_| invalid())?;
    let mut segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default();

    let id = segments.pop().ok_or_else(invalid)?.to_string();
    let target = if segments.contains(&"a") {
        Target::Album { id }
    } else {
        Target::Image { id }
    };

    // Early validation against the canonical API base; a custom-base client
    // re-joins the path when the request is built.
    let base = Url::parse(API_BASE_URL).map_err(|_| invalid())?;
    base.join(&target.request_path()).map_err(|_| invalid())?;

    Ok(target)
}

/// Final non-empty path segment of a URL, if any.
pub(crate) fn last_path_segment(url: &Url) -> Option<&str> {
    url.path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())
}
