#[tokio::main]
async fn main() {
    mano_abiertas::start_server().await;
}
