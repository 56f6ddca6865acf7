#[actix_web::main]
async fn main() -> std::io::Result<()> {
    service_report_server::run().await
}
