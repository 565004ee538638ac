#[tokio::main]
async fn main() {
    eventhub_backend::run().await;
}
