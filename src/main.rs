use anyhow::Result;
use chatdeck::config::Config;
use chatdeck::{logger, ui};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // `--generate-config [path]` writes a default configuration file and exits
    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("--generate-config") {
        let path = match args.next() {
            Some(path) => path.into(),
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(path);
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: invalid configuration: {e:#}");
            eprintln!("\n💡 Run with --generate-config to write a default configuration file.");
            std::process::exit(2);
        }
    };

    if let Err(e) = logger::init(&config.logging) {
        eprintln!("⚠️  Logging disabled: {e:#}");
    }

    // Run the TUI application
    ui::run_app(config).await?;

    Ok(())
}
