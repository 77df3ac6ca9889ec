use imgur_dl::{ClientId, ImgurClient, resolve};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client_id = std::env::var("IMGUR_CLIENT_ID").expect("IMGUR_CLIENT_ID env var not set");
    let url = std::env::args()
        .nth(1)
        .expect("usage: cargo run --example fetch_url -- <imgur_url>");

    let target = resolve(&url)?;
    println!(
        "Resolved as {} {}",
        if target.is_album() { "album" } else { "image" },
        target.id()
    );

    let client = ImgurClient::new(ClientId::new(client_id))?;
    let listing = client.fetch(&target).await?;

    println!("Found {} images:", listing.images.len());
    for image in listing.images.iter() {
        println!("- {}", image.link);
    }

    Ok(())
}
