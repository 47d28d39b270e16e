mod input;
mod runtime;
mod sim;
mod surfaces;

use runtime::Runtime;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ========== PHASE 1 : Configuration et journal ==========

    let config = valconfig::get_config();

    // RUST_LOG prime, sinon le niveau minimum de la configuration
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.get_log_min_level().to_lowercase()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        install = %config.get_install_uuid()?,
        started = %chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "💌 Valentine starting"
    );
    info!(title = %config.get_presentation_title(), "Presentation");

    // ========== PHASE 2 : Assemblage du runtime ==========

    let runtime = Runtime::start(&config)?;
    input::print_help();

    // ========== PHASE 3 : Boucle d'événements ==========

    info!("✅ Valentine is ready!");
    runtime.run().await;

    info!("Valentine stopped");
    Ok(())
}
