use checkers_web::web::run_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("🔴 Starting Checkers Web Server...");
    run_server().await?;
    Ok(())
}
