use imgur_dl::{ClientId, ImgurClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client_id = std::env::var("IMGUR_CLIENT_ID").expect("IMGUR_CLIENT_ID env var not set");
    let album_id = std::env::args()
        .nth(1)
        .expect("usage: cargo run --example list_album -- <album_id>");

    let client = ImgurClient::new(ClientId::new(client_id))?;
    let listing = client.album_images(album_id).await?;

    println!("Found {} images:", listing.images.len());
    for image in listing.images.iter() {
        println!("- {}", image.link);
    }

    if let Some(limit) = listing.rate_limit {
        println!(
            "Rate limit: {} of {} requests remaining",
            limit.client_remaining, limit.client_limit
        );
    }

    Ok(())
}
