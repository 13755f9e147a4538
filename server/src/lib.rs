pub mod auth;
pub mod config;
pub mod error;
pub mod forms;
pub mod store;
pub mod web;

use clap::Parser;

use crate::config::ServerConfig;

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("agency_admin_server=info,tower_http=info");
    let _ = env_logger::Builder::from_env(env).format_timestamp_millis().try_init();
}

pub fn run() {
    init_logging();
    let config = ServerConfig::parse();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("build tokio runtime");
    if let Err(e) = rt.block_on(web::serve(config)) {
        log::error!("server stopped: {}", e);
        std::process::exit(1);
    }
}
