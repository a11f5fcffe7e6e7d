// Entrypoint for the CLI application.
// - Keeps `main` small: create an API client and hand it to the session loop.
// - Returns `anyhow::Result` so a rejected login exits non-zero.

use walletd_cli::{api::ApiClient, ui};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Create an API client configured by environment variable
    // `WALLET_API_URL` or default to http://localhost:8989. See
    // `api::ApiClient::from_env`.
    let api = ApiClient::from_env()?;

    // Run the interactive session. This call blocks until the operator
    // exits, then logs out.
    ui::run(&api, &mut ui::TermConsole)?;
    Ok(())
}
