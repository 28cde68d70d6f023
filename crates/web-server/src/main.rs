// This main function is the entry point when running `cargo run -p web-server`.
// It loads settings from the environment and the default file, then serves.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = configuration::load_settings(None)?;
    let _guard = configuration::init_tracing(&settings.logging)?;

    let addr = settings.server.socket_addr()?;
    web_server::run_server(&settings, addr).await
}
