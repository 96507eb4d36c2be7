use pumpfun_backend::{
    arguments::{patterns, print_debug_info, print_help},
    config::ProxyConfig,
    logger::{self, LogTag},
    webserver,
};

/// Main entry point for the PumpFun backend
///
/// Startup order matters:
/// - .env is loaded before the configuration is read
/// - --help exits before anything is logged
/// - the webserver owns the rest of the process lifetime
#[tokio::main]
async fn main() {
    // Load .env before any configuration is read
    dotenv::dotenv().ok();

    // Check for help request first (before any other processing)
    if patterns::is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    // Initialize logger system
    logger::init();

    // Log startup information
    logger::info(LogTag::System, "🚀 PumpFun backend starting up...");

    // Print debug information if any debug modes are enabled
    print_debug_info();

    let config = match ProxyConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            logger::error(LogTag::Config, &format!("❌ Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    // The service still starts without the key; only the Helius routes
    // answer 500 until it is provided
    if config.upstreams.helius_api_key.is_none() {
        logger::warning(
            LogTag::Config,
            "⚠️  HELIUS_API_KEY is not set - /helius-health and /helius-txs will fail",
        );
    }

    logger::info(
        LogTag::Config,
        &format!("📊 Token source: {}", config.tokens.source.describe()),
    );
    logger::info(
        LogTag::System,
        &format!(
            "🌐 Webserver will be available at http://{}",
            config.listen_addr()
        ),
    );

    // Ctrl+C takes the same graceful shutdown path as an internal stop
    if let Err(e) = ctrlc::set_handler(|| {
        pumpfun_backend::webserver::shutdown();
    }) {
        logger::warning(
            LogTag::System,
            &format!("Failed to install Ctrl+C handler: {}", e),
        );
    }

    match webserver::start_server(config).await {
        Ok(_) => {
            logger::info(LogTag::System, "✅ PumpFun backend stopped");
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ Webserver failed: {}", e));
            std::process::exit(1);
        }
    }
}
