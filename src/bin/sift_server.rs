use std::{
    error::Error,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use clap::Parser;
use log::info;
use sift::{SearchServer, ServerConfig};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = ServerConfig::parse();

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;

    let context = zmq::Context::new();
    let mut server = SearchServer::bind(&context, &config)?;

    server.serve(&shutdown)?;
    info!("shutting down search service");
    Ok(())
}
