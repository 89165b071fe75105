use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // Load .env early so RUST_LOG and friends take effect.
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_default();
    info!(service = "console", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();

    // Basic service context (no sensitive information)
    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // Panic hook: log the failure so it shows up next to everything else.
    std::panic::set_hook(Box::new({
        let service_id = service_id;
        move |info| {
            error!(
                service = "console",
                event = "panic",
                %service_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "console", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "console",
        event = "start",
        %service_id,
        pid,
        version,
        "admin console starting"
    );

    // Run the console in its own task and shut down on Ctrl+C.
    let exit_code = rt.block_on(async move {
        let console_task = tokio::spawn(async move {
            if let Err(e) = console::run().await {
                error!(service = "console", event = "run_failed", error = %e, "console::run returned error");
                Err(e)
            } else {
                Ok(())
            }
        });

        tokio::select! {
            res = console_task => {
                match res {
                    Ok(Ok(())) => {
                        info!(service = "console", event = "stop", %service_id, pid, "console stopped normally");
                        std::process::ExitCode::SUCCESS
                    }
                    Ok(Err(_)) => {
                        // error already logged above
                        std::process::ExitCode::FAILURE
                    }
                    Err(e) => {
                        error!(service = "console", event = "task_join_error", error = %e, "console task join error");
                        std::process::ExitCode::FAILURE
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!(service = "console", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
                std::process::ExitCode::SUCCESS
            }
        }
    });

    exit_code
}
