//! Async client and command-line pipeline for downloading images from Imgur.
//!
//! User-facing Imgur URLs resolve into API [`Target`]s, the [`ImgurClient`]
//! fetches the image listing behind a target from the v3 API, and the [`cli`]
//! module drives resolution, fetching, and downloading for the `imgur-dl` binary.

pub mod cli;
mod client;
mod error;
mod models;
mod resolve;
mod transport;
mod utils;

pub use client::{ImgurClient, ImgurClientBuilder};
pub use error::ImgurError;
pub use models::{ClientId, Image, ImageList, RateLimit};
pub use resolve::{Target, resolve};
