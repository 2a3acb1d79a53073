use std::process::ExitCode;

use axum::Router;
use common::utils::logging::init_logging_default;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use crate::Binding;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router for `binding` over a freshly seeded in-memory store.
pub fn app(binding: Binding) -> Router {
    routes::build_router(AppState::seeded(binding), build_cors())
}

async fn shutdown_signal(binding: Binding) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(service = binding.name(), event = "signal_error", error = %e, "failed to listen for Ctrl+C");
        return;
    }
    info!(service = binding.name(), event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Bind the configured address and serve until Ctrl+C.
pub async fn run_with_config(binding: Binding, cfg: &AppConfig) -> Result<(), StartupError> {
    let addr = cfg.server.bind_addr(binding.default_port());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(service = binding.name(), %addr, "listening");

    axum::serve(listener, app(binding))
        .with_graceful_shutdown(shutdown_signal(binding))
        .await
        .map_err(|e| StartupError::Any(e.into()))
}

/// Public entry: load configuration and run the HTTP server for `binding`.
pub async fn run(binding: Binding) -> Result<(), StartupError> {
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    run_with_config(binding, &cfg).await
}

/// Process entry used by the binaries: logging, panic hook, runtime and exit code.
pub fn launch(binding: Binding) -> ExitCode {
    // 提前加载 .env，使得 RUST_LOG 等环境变量生效
    dotenv().ok();
    init_logging_default();
    let service = binding.name();
    info!(service, event = "logger_init", "tracing subscriber initialized");

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // Panic 钩子：捕获异常并输出错误日志
    std::panic::set_hook(Box::new(move |info| {
        error!(service, event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    // 读取线程配置（优先 config.toml，其次环境变量 TOKIO_WORKER_THREADS）
    let worker_threads = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(_) => std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()),
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service,
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "{} service starting",
        binding.title()
    );

    match rt.block_on(run(binding)) {
        Ok(()) => {
            info!(service, event = "stop", %service_id, pid, "server stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service, event = "run_failed", error = %e, "server returned error");
            ExitCode::FAILURE
        }
    }
}
