use std::process::ExitCode;

use log::error;
use recordstore_core::{init_logging, Config};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("recordstore_server: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, &config.log_dir, "server") {
        eprintln!("recordstore_server: {err}");
        return ExitCode::FAILURE;
    }

    match recordstore_server::start_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=http status=error error={err}");
            ExitCode::FAILURE
        }
    }
}
