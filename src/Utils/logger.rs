use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;

/// terminal logger, and a copy into log_file if given.
/// Calling it twice is harmless: the second call returns an error that is only reported
pub fn init_logger(level: LevelFilter, log_file: Option<&str>) {
    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => loggers.push(WriteLogger::new(
                level,
                ConfigBuilder::new().set_time_format_rfc3339().build(),
                file,
            )),
            Err(e) => eprintln!("cannot create log file {}: {}", path, e),
        }
    }
    if let Err(e) = CombinedLogger::init(loggers) {
        eprintln!("logger already initialized: {}", e);
    }
}
