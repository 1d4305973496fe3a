use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use log::{debug, error, info, warn};

use crate::{cli::ServerConfig, error::ServiceError};

use super::{
    Channel, DownstreamClient, ProtocolTransport, Request, Response, Router, TransportError,
    socket_timeout,
};

/// How often an idle server wakes up to check for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Owns both channel ends and answers one request at a time.
pub struct SearchServer<I: Channel, D: Channel> {
    inbound: ProtocolTransport<I>,
    router: Router<D>,
}

impl SearchServer<zmq::Socket, zmq::Socket> {
    /// Bind the inbound REP socket and connect the REQ socket to the data-storage service.
    pub fn bind(context: &zmq::Context, config: &ServerConfig) -> Result<Self, TransportError> {
        let inbound = context.socket(zmq::REP)?;
        inbound.set_linger(0)?;
        inbound.set_rcvtimeo(socket_timeout(Some(POLL_INTERVAL)))?;
        inbound.bind(&config.bind)?;

        let downstream = context.socket(zmq::REQ)?;
        downstream.set_linger(0)?;
        // Abandoned queries must not block the next one, and their late replies are dropped.
        downstream.set_req_correlate(true)?;
        downstream.set_req_relaxed(true)?;
        downstream.set_rcvtimeo(socket_timeout(config.downstream_timeout()))?;
        downstream.connect(&config.downstream)?;

        info!("search service listening at {}", config.bind);
        info!("connected to data-storage service at {}", config.downstream);

        Ok(Self::new(inbound, downstream))
    }
}

impl<I: Channel, D: Channel> SearchServer<I, D> {
    pub fn new(inbound: I, downstream: D) -> Self {
        Self {
            inbound: ProtocolTransport::new(inbound),
            router: Router::new(DownstreamClient::new(downstream)),
        }
    }

    /// Serve requests until `shutdown` is raised or the inbound channel closes.
    pub fn serve(&mut self, shutdown: &AtomicBool) -> Result<(), TransportError> {
        while !shutdown.load(Ordering::SeqCst) {
            match self.serve_once() {
                Ok(_) => {}
                Err(TransportError::Closed) => break,
                Err(e) => return Err(e),
            }
        }

        info!("search service stopped");
        Ok(())
    }

    /// Wait for one request and answer it.
    ///
    /// Returns `false` when no request arrived before the poll interval elapsed or a signal
    /// interrupted the wait.
    ///
    /// A reply that cannot be sent is fatal: the REP socket stays waiting to send and cannot
    /// receive again.
    pub fn serve_once(&mut self) -> Result<bool, TransportError> {
        let frame = match self.inbound.read_frame() {
            Ok(frame) => frame,
            Err(TransportError::Timeout | TransportError::Interrupted) => return Ok(false),
            Err(e) => return Err(e),
        };

        let response = self.handle(&frame);

        loop {
            match self.inbound.write_json(&response) {
                Ok(()) => return Ok(true),
                Err(TransportError::Interrupted) => continue,
                Err(e) => {
                    error!("failed to send reply: {e}");
                    return Err(e);
                }
            }
        }
    }

    /// Turn one raw request frame into the reply for it. Never fails.
    pub fn handle(&mut self, frame: &[u8]) -> Response {
        match self.process(frame) {
            Ok(response) => response,
            Err(e) => {
                warn!("request failed: {e}");
                Response::from(&e)
            }
        }
    }

    fn process(&mut self, frame: &[u8]) -> Result<Response, ServiceError> {
        let request = Request::from_frame(frame)?;
        debug!("received request: {request:?}");

        self.router.route(request)
    }
}
