use std::net::SocketAddr;
use std::sync::Arc;

use advocate_genai::{
    http, ChatConfig, ImageConfig, OpenAiChat, OpenAiImages, SearchConfig, TavilySearch,
    WebSearch,
};
use advocate_pipeline::{CampaignFlow, CampaignStore, PipelineConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advocate_api::config::ServerConfig;
use advocate_api::router::build_app_router;
use advocate_api::sessions::SessionStore;
use advocate_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "advocate_api=debug,advocate_pipeline=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let pipeline_config = PipelineConfig::from_env().expect("Invalid pipeline configuration");
    tracing::info!(
        output_dir = %pipeline_config.output_dir.display(),
        max_regenerations = pipeline_config.max_regenerations,
        "Loaded pipeline configuration"
    );

    // --- Generative AI clients (one connection pool shared by all three) ---
    let http_client = http::build_client().expect("Failed to build HTTP client");

    let chat_config = ChatConfig::from_env().expect("Invalid chat model configuration");
    let llm = OpenAiChat::with_client(http_client.clone(), chat_config);
    tracing::info!(model = llm.model(), "Chat model client created");

    let image_config = ImageConfig::from_env().expect("Invalid image model configuration");
    let images = OpenAiImages::with_client(http_client.clone(), image_config);

    let search: Option<Arc<dyn WebSearch>> = match SearchConfig::from_env()
        .expect("Invalid web search configuration")
    {
        Some(search_config) => {
            let client: Arc<dyn WebSearch> =
                Arc::new(TavilySearch::with_client(http_client, search_config));
            tracing::info!("Web search enabled");
            Some(client)
        }
        None => {
            tracing::info!("TAVILY_API_KEY not set, research runs without web search");
            None
        }
    };

    // --- App state ---
    let flow = CampaignFlow::new(Arc::new(llm), Arc::new(images), search, &pipeline_config);
    let state = AppState {
        config: Arc::new(config.clone()),
        flow: Arc::new(flow),
        store: CampaignStore::new(pipeline_config.output_dir.clone()),
        sessions: Arc::new(SessionStore::new()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
