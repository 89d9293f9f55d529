use colored::Colorize;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = argq::cli::run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
