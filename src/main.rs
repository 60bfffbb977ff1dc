use colored::Colorize;
use ip_range_tools::cli;
use ip_range_tools::config::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let config = Config::from_env();
    if let Err(e) = log4rs::init_file(&config.log_config_file, Default::default()) {
        eprintln!(
            "{} logging disabled, cannot load {}: {e}",
            "WARN".yellow(),
            config.log_config_file
        );
    }
    log::info!("#Start main()");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match cli::run(&args, &config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {e}", "ERROR".on_red());
            ExitCode::FAILURE
        }
    }
}
