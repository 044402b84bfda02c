use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[clap(name = "exercise tracker server")]
pub struct Cli {
    /// Directory holding the landing page
    #[clap(long, env, default_value = "assets")]
    pub assets_dir: PathBuf,
    /// Path of the sqlite database. Required, there is no default store
    #[clap(long, env)]
    pub sqlite_connection_string: String,
    #[clap(long, env, default_value = "3000")]
    pub port: u16,
    #[clap(long, env, default_value = "127.0.0.1")]
    pub bind_addr: String,
    /// Only allow cross origin requests from this origin. Any origin is
    /// allowed when unset
    #[arg(long, env)]
    pub cors_origin: Option<String>,
}
