use anyhow::Result;
use batch_renamer::cli::Cli;
use batch_renamer::config::types::Config;
use batch_renamer::init;
use batch_renamer::signal::setup_shutdown_signal;
use clap::Parser;

fn main() -> Result<()> {
    init::init();
    let cli = Cli::parse();
    let shutdown_signal = setup_shutdown_signal()?;

    // Load config and set locale
    let mut config = Config::new()?;
    let language = cli.language.unwrap_or(config.settings.language);
    rust_i18n::set_locale(language.as_str());

    cli.run(&shutdown_signal, &mut config)
}
