use std::process::ExitCode;

use common::utils::logging::init_logging_json;
use dotenvy::dotenv;
use service::seed::{self, SeedOutcome};
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // 加载 .env（允许使用 RUST_LOG 配置日志级别）
    dotenv().ok();
    init_logging_json();
    info!(service = "seed", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let fresh = std::env::args().skip(1).any(|a| a == "--fresh");

    // Panic 钩子：捕获异常并输出错误日志
    std::panic::set_hook(Box::new(move |info| {
        error!(service = "seed", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "seed", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "seed", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(service = "seed", event = "start", %service_id, pid, fresh, database = %cfg.database.url, "initializing database");

    let result = rt.block_on(async {
        if fresh {
            seed::init_db_fresh(&cfg.database).await
        } else {
            seed::init_db(&cfg.database).await
        }
    });

    match result {
        Ok(SeedOutcome::Created(report)) => {
            info!(service = "seed", event = "seeded", ?report, "Database initialized successfully");
            ExitCode::SUCCESS
        }
        Ok(SeedOutcome::AlreadySeeded(report)) => {
            info!(service = "seed", event = "skipped", ?report, "Database already contains data");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "seed", event = "init_failed", error = %e, "Error initializing database");
            ExitCode::FAILURE
        }
    }
}
