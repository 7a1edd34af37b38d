#[tokio::main]
async fn main() {
    tasting_backend::run().await;
}
