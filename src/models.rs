use reqwest::Url;
use reqwest::header::HeaderMap;
use serde::Deserialize;

use crate::ImgurError;
use crate::resolve;

const CLIENT_LIMIT_HEADER: &str = "x-ratelimit-clientlimit";
const CLIENT_REMAINING_HEADER: &str = "x-ratelimit-clientremaining";

/// An Imgur API client ID, sent as `Authorization: Client-ID <id>` on API requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub(crate) fn header_value(&self) -> String {
        format!("Client-ID {}", self.0)
    }
}

/// A single image in an album listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Image {
    /// Direct link to the image file.
    pub link: String,
}

impl Image {
    /// The fetchable URL and local file name for this image.
    ///
    /// The file name is the final non-empty path segment of the link.
    ///
    /// # Errors
    ///
    /// Returns [`ImgurError::InvalidImageLink`] when the link does not parse as a
    /// URL or carries no file name. Callers downloading a whole album treat this as
    /// a per-image failure and skip the entry.
    pub fn download_target(&self) -> Result<(Url, String), ImgurError> {
        let url = Url::parse(&self.link)
            .map_err(|_| ImgurError::InvalidImageLink(self.link.clone()))?;
        let file_name = resolve::last_path_segment(&url)
            .ok_or_else(|| ImgurError::InvalidImageLink(self.link.clone()))?
            .to_string();
        Ok((url, file_name))
    }
}

/// Client-level rate limit state reported in API response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests remaining in the current window.
    pub client_remaining: u64,
    /// Total requests allowed per window.
    pub client_limit: u64,
}

impl RateLimit {
    /// Read the rate limit counters from response headers.
    ///
    /// Returns `None` unless both counters are present and numeric; the headers are
    /// advisory and some responses omit them.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        Some(Self {
            client_remaining: header_u64(headers, CLIENT_REMAINING_HEADER)?,
            client_limit: header_u64(headers, CLIENT_LIMIT_HEADER)?,
        })
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

/// The images behind a resolved target plus the rate limit state observed on the
/// response that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageList {
    pub images: Vec<Image>,
    pub rate_limit: Option<RateLimit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumImagesResponse {
    data: Option<AlbumData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumData {
    images: Option<Vec<Image>>,
}

impl TryFrom<AlbumImagesResponse> for Vec<Image> {
    type Error = ImgurError;

    fn try_from(response: AlbumImagesResponse) -> Result<Self, Self::Error> {
        let data = response
            .data
            .ok_or(ImgurError::MissingField("album response missing data"))?;
        data.images
            .ok_or(ImgurError::MissingField("album response missing images"))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageResponse {
    data: Option<Image>,
}

impl TryFrom<ImageResponse> for Vec<Image> {
    type Error = ImgurError;

    fn try_from(response: ImageResponse) -> Result<Self, Self::Error> {
        let image = response
            .data
            .ok_or(ImgurError::MissingField("image response missing data"))?;
        Ok(vec![image])
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderName, HeaderValue};

    use super::*;

    #[test]
    fn client_id_header_value() {
        let id = ClientId::new("546c25a59c58ad7");
        assert_eq!(id.as_str(), "546c25a59c58ad7");
        assert_eq!(id.header_value(), "Client-ID 546c25a59c58ad7");
    }

    #[test]
    fn decodes_album_images_in_order() {
        let body = r#"{
            "data": {
                "id": "xK9dQ2f",
                "images": [
                    {"id": "one", "link": "https://i.imgur.com/one.jpg"},
                    {"id": "two", "link": "https://i.imgur.com/two.png"},
                    {"id": "three", "link": "https://i.imgur.com/three.gif"}
                ]
            },
            "success": true,
            "status": 200
        }"#;

        let response: AlbumImagesResponse = serde_json::from_str(body).unwrap();
        let images: Vec<Image> = response.try_into().unwrap();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].link, "https://i.imgur.com/one.jpg");
        assert_eq!(images[1].link, "https://i.imgur.com/two.png");
        assert_eq!(images[2].link, "https://i.imgur.com/three.gif");
    }

    #[test]
    fn empty_album_decodes_to_empty_list() {
        let body = r#"{"data": {"images": []}, "success": true, "status": 200}"#;
        let response: AlbumImagesResponse = serde_json::from_str(body).unwrap();
        let images: Vec<Image> = response.try_into().unwrap();
        assert!(images.is_empty());
    }

    #[test]
    fn album_response_without_data_is_missing_field() {
        let body = r#"{"success": false, "status": 404}"#;
        let response: AlbumImagesResponse = serde_json::from_str(body).unwrap();
        let result: Result<Vec<Image>, _> = response.try_into();
        assert!(matches!(
            result,
            Err(ImgurError::MissingField("album response missing data"))
        ));
    }

    #[test]
    fn album_response_without_images_is_missing_field() {
        let body = r#"{"data": {"id": "xK9dQ2f"}, "success": true, "status": 200}"#;
        let response: AlbumImagesResponse = serde_json::from_str(body).unwrap();
        let result: Result<Vec<Image>, _> = response.try_into();
        assert!(matches!(
            result,
            Err(ImgurError::MissingField("album response missing images"))
        ));
    }

    #[test]
    fn image_response_normalizes_to_single_entry_list() {
        let body = r#"{
            "data": {"id": "mJd3Pli", "link": "https://i.imgur.com/mJd3Pli.jpg"},
            "success": true,
            "status": 200
        }"#;

        let response: ImageResponse = serde_json::from_str(body).unwrap();
        let images: Vec<Image> = response.try_into().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].link, "https://i.imgur.com/mJd3Pli.jpg");
    }

    #[test]
    fn image_response_without_data_is_missing_field() {
        let body = r#"{"success": false, "status": 404}"#;
        let response: ImageResponse = serde_json::from_str(body).unwrap();
        let result: Result<Vec<Image>, _> = response.try_into();
        assert!(matches!(
            result,
            Err(ImgurError::MissingField("image response missing data"))
        ));
    }

    #[test]
    fn download_target_splits_url_and_file_name() {
        let image = Image {
            link: "https://i.imgur.com/mJd3Pli.jpg".into(),
        };
        let (url, file_name) = image.download_target().unwrap();
        assert_eq!(url.as_str(), "https://i.imgur.com/mJd3Pli.jpg");
        assert_eq!(file_name, "mJd3Pli.jpg");
    }

    #[test]
    fn download_target_skips_trailing_slash() {
        let image = Image {
            link: "https://i.imgur.com/mJd3Pli.jpg/".into(),
        };
        let (_, file_name) = image.download_target().unwrap();
        assert_eq!(file_name, "mJd3Pli.jpg");
    }

    #[test]
    fn unparseable_link_is_invalid() {
        let image = Image {
            link: "not-a-url".into(),
        };
        assert!(matches!(
            image.download_target(),
            Err(ImgurError::InvalidImageLink(link)) if link == "not-a-url"
        ));
    }

    #[test]
    fn link_without_file_name_is_invalid() {
        let image = Image {
            link: "https://i.imgur.com/".into(),
        };
        assert!(matches!(
            image.download_target(),
            Err(ImgurError::InvalidImageLink(_))
        ));
    }

    #[test]
    fn rate_limit_reads_both_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_LIMIT_HEADER, HeaderValue::from_static("500"));
        headers.insert(CLIENT_REMAINING_HEADER, HeaderValue::from_static("497"));

        let limit = RateLimit::from_headers(&headers).unwrap();
        assert_eq!(limit.client_limit, 500);
        assert_eq!(limit.client_remaining, 497);
    }

    #[test]
    fn rate_limit_headers_match_case_insensitively() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(b"X-RateLimit-ClientLimit").unwrap(),
            HeaderValue::from_static("500"),
        );
        headers.insert(
            HeaderName::from_bytes(b"X-RateLimit-ClientRemaining").unwrap(),
            HeaderValue::from_static("42"),
        );

        let limit = RateLimit::from_headers(&headers).unwrap();
        assert_eq!(limit.client_limit, 500);
        assert_eq!(limit.client_remaining, 42);
    }

    #[test]
    fn rate_limit_is_none_when_either_header_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_LIMIT_HEADER, HeaderValue::from_static("500"));
        assert_eq!(RateLimit::from_headers(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_REMAINING_HEADER, HeaderValue::from_static("497"));
        assert_eq!(RateLimit::from_headers(&headers), None);

        assert_eq!(RateLimit::from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn rate_limit_is_none_when_a_header_is_not_numeric() {
        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_LIMIT_HEADER, HeaderValue::from_static("plenty"));
        headers.insert(CLIENT_REMAINING_HEADER, HeaderValue::from_static("497"));
        assert_eq!(RateLimit::from_headers(&headers), None);
    }
}
