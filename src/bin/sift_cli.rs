use std::error::Error;

use clap::Parser;
use serde_json::Value;
use sift::{
    ClientConfig,
    protocol::{ProtocolTransport, socket_timeout},
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = ClientConfig::parse();
    let request: Value = serde_json::from_str(&cli.request)?;
    if !request.is_object() {
        return Err("request must be a JSON object".into());
    }

    let context = zmq::Context::new();
    let socket = context.socket(zmq::REQ)?;
    socket.set_linger(0)?;
    socket.set_rcvtimeo(socket_timeout(cli.timeout()))?;
    socket.connect(&cli.address)?;

    let mut transport = ProtocolTransport::new(socket);
    let reply: Value = transport.request(&request)?;

    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}
