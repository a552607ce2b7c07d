use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// Extract cover and chapter illustrations from the EPUB files in the
/// current directory into `<name>_images.zip` archives
#[derive(Parser, Debug)]
#[command(name = "epub-images", version, about)]
pub struct Cli {
    /// Also search subdirectories for EPUB files
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Delete each original EPUB once its images were extracted successfully
    #[arg(short, long, default_value_t = false)]
    pub delete: bool,

    /// Log more detail to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(cli: &Cli) {
    let filter = match cli.verbose {
        0 => "epub_images=info",
        1 => "epub_images=debug",
        _ => "epub_images=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
