#[actix_web::main]
async fn main() -> std::io::Result<()> {
    briefdruck_server::run().await
}
