use reqwest::{
    Client, RequestBuilder, StatusCode, Url,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::de::DeserializeOwned;

use crate::{ClientId, ImgurError, RateLimit};

/// Low-level HTTP plumbing shared by the client methods.
///
/// API requests go to paths joined onto the base URL and carry the `Client-ID`
/// authorization header; image downloads go to absolute CDN links and carry no
/// credentials.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) client_id: ClientId,
}

impl Transport {
    pub(crate) fn new(client: Client, base_url: Url, client_id: ClientId) -> Self {
        Self {
            client,
            base_url,
            client_id,
        }
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// GET an API path and decode the JSON body, reporting the rate limit state
    /// observed on the response headers alongside it.
    pub(crate) async fn get_json<T>(&self, path: &str) -> Result<(T, Option<RateLimit>), ImgurError>
    where
        T: DeserializeOwned,
    {
        let response = self.build_request(path)?.send().await?;
        let rate_limit = RateLimit::from_headers(response.headers());
        Self::map_status(response.status())?;

        // Malformed JSON must surface as a decode error, not a transport error.
        let body = response.bytes().await?;
        let value = serde_json::from_slice(&body)?;
        Ok((value, rate_limit))
    }

    /// GET an absolute URL without authentication.
    pub(crate) async fn get_raw(&self, url: Url) -> Result<reqwest::Response, ImgurError> {
        self.image_request(url).send().await.map_err(ImgurError::from)
    }

    // Image CDN links are fetched as-is; they need no credentials.
    fn image_request(&self, url: Url) -> RequestBuilder {
        self.client.get(url)
    }

    fn build_request(&self, path: &str) -> Result<RequestBuilder, ImgurError> {
        let url = self.join_path(path)?;
        Ok(self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, self.client_id.header_value()))
    }

    pub(crate) fn join_path(&self, path: &str) -> Result<Url, ImgurError> {
        Ok(self.base_url.join(path)?)
    }

    pub(crate) fn map_status(status: StatusCode) -> Result<(), ImgurError> {
        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(ImgurError::AuthenticationFailed(status))
        } else {
            Err(ImgurError::RequestFailed(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> Transport {
        Transport::new(
            Client::new(),
            Url::parse("https://api.imgur.com/3/").unwrap(),
            ClientId::new("secret"),
        )
    }

    #[test]
    fn join_path_appends_to_base() {
        let url = transport().join_path("album/xK9dQ2f/images").unwrap();
        assert_eq!(url.as_str(), "https://api.imgur.com/3/album/xK9dQ2f/images");
    }

    #[test]
    fn join_path_follows_configured_base() {
        let transport = Transport::new(
            Client::new(),
            Url::parse("http://127.0.0.1:8080/3/").unwrap(),
            ClientId::new("abc"),
        );
        let url = transport.join_path("album/xK9dQ2f/images").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/3/album/xK9dQ2f/images");
    }

    #[test]
    fn api_request_carries_client_id_authorization() {
        let request = transport()
            .build_request("image/mJd3Pli")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "https://api.imgur.com/3/image/mJd3Pli");
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Client-ID secret"
        );
        assert_eq!(request.headers().get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn image_request_is_unauthenticated() {
        let url = Url::parse("https://i.imgur.com/mJd3Pli.jpg").unwrap();
        let request = transport().image_request(url).build().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn success_statuses_pass_through() {
        assert!(Transport::map_status(StatusCode::OK).is_ok());
        assert!(Transport::map_status(StatusCode::NO_CONTENT).is_ok());
    }

    #[test]
    fn auth_statuses_map_to_authentication_failed() {
        assert!(matches!(
            Transport::map_status(StatusCode::UNAUTHORIZED),
            Err(ImgurError::AuthenticationFailed(StatusCode::UNAUTHORIZED))
        ));
        assert!(matches!(
            Transport::map_status(StatusCode::FORBIDDEN),
            Err(ImgurError::AuthenticationFailed(StatusCode::FORBIDDEN))
        ));
    }

    #[test]
    fn other_statuses_map_to_request_failed() {
        assert!(matches!(
            Transport::map_status(StatusCode::NOT_FOUND),
            Err(ImgurError::RequestFailed(StatusCode::NOT_FOUND))
        ));
        assert!(matches!(
            Transport::map_status(StatusCode::TOO_MANY_REQUESTS),
            Err(ImgurError::RequestFailed(StatusCode::TOO_MANY_REQUESTS))
        ));
    }
}
