use std::path::PathBuf;
use std::process;

use tracing::error;

fn main() {
    tracing_subscriber::fmt::init();

    let Some(directory) = std::env::args_os().nth(1).map(PathBuf::from) else {
        error!("Usage: generate_assets <directory>");
        process::exit(2);
    };

    if let Err(err) = alexa_skill::assets::write(&directory) {
        error!("Error: {err:#}");
        process::exit(1);
    }
}
