use clap::Parser;
use libutf8::cli::{self, Cli};
use libutf8::config::Config;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load();
    let stdout = std::io::stdout();
    if let Err(e) = cli::run(&cli, &config, &mut stdout.lock()) {
        eprintln!("utf8: {}", e);
        std::process::exit(1);
    }
}
