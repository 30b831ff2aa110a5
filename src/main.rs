//! pentest-eval - command line entry point

use pentest_eval::cli::{CliApp, exit_codes};

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        // Only warn if it's not a "file not found" error
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let code = match CliApp::new() {
        Ok(app) => match app.run().await {
            Ok(code) => code,
            Err(e) => {
                eprintln!("error: {:#}", e);
                exit_codes::CONFIG_ERROR
            }
        },
        Err(e) => {
            eprintln!("error: {:#}", e);
            exit_codes::CONFIG_ERROR
        }
    };

    std::process::exit(code);
}
