use anyhow::Context;
use clap::Parser;
use pack_utils::config::cli::execute;
use pack_utils::utils::logger::{self, LogFormat};
use pack_utils::utils::validation::Validate;
use pack_utils::{CliArgs, PackConfig, PackError};

fn main() {
    let args = CliArgs::parse();

    let format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    if let Err(e) = logger::init_logger(format, args.verbose) {
        eprintln!("⚠️  {}", e);
    }

    if let Err(e) = run(args) {
        match e.downcast_ref::<PackError>() {
            Some(pack_error) => {
                tracing::error!("❌ Command failed: {:#}", e);
                eprintln!("❌ {}", pack_error.user_friendly_message());
                eprintln!("💡 Suggestion: {}", pack_error.recovery_suggestion());
            }
            None => eprintln!("❌ {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => PackConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PackConfig::default(),
    };
    config.validate()?;

    tracing::debug!("Running {:?}", args.command);
    let output = execute(&args.command, &config)?;
    println!("{}", output);
    Ok(())
}
