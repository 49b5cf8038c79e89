// Entrypoint for the CLI application.
// - Keeps `main` small: init logging, create an API client, run the menu.
// - Returns `anyhow::Result` to keep error handling at the boundary simple.

use qavision_cli::{api::ApiClient, ui::main_menu};

fn main() -> anyhow::Result<()> {
    // RUST_LOG controls verbosity; quiet by default so log lines do not
    // fight the interactive prompts.
    env_logger::init();

    // Backend base URL comes from `QAVISION_API_URL`, defaulting to
    // http://localhost:8000. See `api::ApiClient::from_env`.
    let api = ApiClient::from_env()?;

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(api)?;
    Ok(())
}
