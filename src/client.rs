use std::time::Duration;

use reqwest::{Client, ClientBuilder, Url};

use crate::models::{AlbumImagesResponse, ImageResponse};
use crate::transport::Transport;
use crate::utils::default_user_agent;
use crate::{ClientId, ImageList, ImgurError, Target};

pub(crate) const API_BASE_URL: &str = "https://api.imgur.com/3/";

/// Async HTTP client for the Imgur album and image endpoints.
///
/// Every API request is authenticated with the configured [`ClientId`]; image
/// downloads hit the CDN links returned by the API and carry no credentials.
#[derive(Debug, Clone)]
pub struct ImgurClient {
    transport: Transport,
}

/// Builder for [`ImgurClient`].
#[derive(Debug)]
pub struct ImgurClientBuilder {
    client_id: ClientId,
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    builder: ClientBuilder,
}

impl ImgurClient {
    /// Build a client with the crate defaults and the given client ID.
    ///
    /// # Errors
    ///
    /// Returns [`ImgurError::Http`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(client_id: ClientId) -> Result<Self, ImgurError> {
        Self::builder(client_id).build()
    }

    /// Start configuring a client.
    ///
    /// Defaults:
    /// - Base URL: `https://api.imgur.com/3/`
    /// - User agent: `imgur-dl/<version>`
    /// - No request timeout; requests wait for the server indefinitely
    pub fn builder(client_id: ClientId) -> ImgurClientBuilder {
        ImgurClientBuilder::new(client_id)
    }

    /// Current base URL.
    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    /// The client ID this client authenticates with.
    pub fn client_id(&self) -> &ClientId {
        self.transport.client_id()
    }

    /// Fetch the images behind a resolved [`Target`].
    ///
    /// Albums map to the album-images endpoint and yield all images in album
    /// order; single images map to the image endpoint and yield a one-entry list.
    ///
    /// # Errors
    ///
    /// - [`ImgurError::AuthenticationFailed`] / [`ImgurError::RequestFailed`] for non-2xx statuses
    /// - [`ImgurError::Decode`] if the response body is not the expected JSON shape
    /// - [`ImgurError::MissingField`] if the body omits the image data
    /// - [`ImgurError::Http`] for transport failures (including timeouts, if one was configured)
    pub async fn fetch(&self, target: &Target) -> Result<ImageList, ImgurError> {
        let path = target.request_path();
        match target {
            Target::Album { .. } => {
                let (response, rate_limit) =
                    self.transport.get_json::<AlbumImagesResponse>(&path).await?;
                Ok(ImageList {
                    images: response.try_into()?,
                    rate_limit,
                })
            }
            Target::Image { .. } => {
                let (response, rate_limit) =
                    self.transport.get_json::<ImageResponse>(&path).await?;
                Ok(ImageList {
                    images: response.try_into()?,
                    rate_limit,
                })
            }
        }
    }

    /// Fetch all images in an album.
    ///
    /// # Errors
    ///
    /// Any error returned by [`ImgurClient::fetch`].
    pub async fn album_images(&self, album_id: impl Into<String>) -> Result<ImageList, ImgurError> {
        self.fetch(&Target::Album {
            id: album_id.into(),
        })
        .await
    }

    /// Fetch a single image as a one-entry list.
    ///
    /// # Errors
    ///
    /// Any error returned by [`ImgurClient::fetch`].
    pub async fn image(&self, image_id: impl Into<String>) -> Result<ImageList, ImgurError> {
        self.fetch(&Target::Image {
            id: image_id.into(),
        })
        .await
    }

    /// Download the bytes behind an image link.
    ///
    /// The request is unauthenticated; Imgur CDN links are publicly fetchable.
    ///
    /// # Errors
    ///
    /// - [`ImgurError::AuthenticationFailed`] / [`ImgurError::RequestFailed`] for non-2xx statuses
    /// - [`ImgurError::Http`] for transport failures (including timeouts, if one was configured)
    pub async fn download(&self, url: Url) -> Result<Vec<u8>, ImgurError> {
        let response = self.transport.get_raw(url).await?;
        Transport::map_status(response.status())?;
        Ok(response.bytes().await?.into())
    }
}

impl ImgurClientBuilder {
    /// Create a new builder using the crate defaults.
    ///
    /// This is equivalent to [`ImgurClient::builder`].
    pub fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            base_url: None,
            user_agent: None,
            timeout: None,
            builder: Client::builder(),
        }
    }

    /// Override the base URL used for API requests.
    ///
    /// `base_url` is parsed as a [`Url`]. It is then used as the base for relative
    /// API paths via [`Url::join`], so a trailing slash is recommended.
    pub fn base_url(mut self, base_url: impl AsRef<str>) -> Result<Self, ImgurError> {
        self.base_url = Some(Url::parse(base_url.as_ref())?);
        Ok(self)
    }

    /// Set a custom user agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Configure a request timeout.
    ///
    /// This sets [`reqwest::ClientBuilder::timeout`], which applies a single
    /// deadline per request. No timeout applies unless one is configured here;
    /// timeout failures surface as [`ImgurError::Http`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build an [`ImgurClient`].
    ///
    /// If no base URL is configured, this uses `https://api.imgur.com/3/`.
    /// If no user agent is configured, `imgur-dl/<version>` is used.
    pub fn build(self) -> Result<ImgurClient, ImgurError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(API_BASE_URL)?,
        };

        let mut builder = self.builder;
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder = builder.user_agent(self.user_agent.unwrap_or_else(default_user_agent));

        let client = builder.build()?;

        Ok(ImgurClient {
            transport: Transport::new(client, base_url, self.client_id),
        })
    }
}
