use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "feedmail")]
#[command(about = "Mails new RSS/Atom entries, once each", long_about = None)]
pub struct Cli {
    /// Verbose (debug level) logging; the default is info
    #[arg(short, long)]
    pub debug: bool,

    /// Log to the given file instead of stderr
    #[arg(short, long, value_name = "PATH")]
    pub logfile: Option<PathBuf>,
}

impl Cli {
    /// Filter directive used when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}
