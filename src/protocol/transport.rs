use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("timed out waiting for a message")]
    Timeout,
    #[error("interrupted by a signal")]
    Interrupted,
    #[error("channel closed")]
    Closed,
    #[error("a reply is still outstanding on this channel")]
    ReplyOutstanding,
    #[error("failed to encode or decode message: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("Transport ZeroMQ Error: {0}")]
    Zmq(zmq::Error),
}

impl From<zmq::Error> for TransportError {
    fn from(value: zmq::Error) -> Self {
        match value {
            zmq::Error::EAGAIN => TransportError::Timeout,
            zmq::Error::EINTR => TransportError::Interrupted,
            zmq::Error::ETERM => TransportError::Closed,
            e => TransportError::Zmq(e),
        }
    }
}

/// One end of a request/reply exchange carrying whole frames.
pub trait Channel {
    fn send_frame(&mut self, frame: &[u8]) -> Result<(), TransportError>;
    fn recv_frame(&mut self) -> Result<Vec<u8>, TransportError>;
}

impl Channel for zmq::Socket {
    fn send_frame(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        zmq::Socket::send(self, frame, 0)?;
        Ok(())
    }

    fn recv_frame(&mut self) -> Result<Vec<u8>, TransportError> {
        Ok(zmq::Socket::recv_bytes(self, 0)?)
    }
}

/// Converts an optional wait into a ZeroMQ socket timeout; `-1` blocks forever.
pub fn socket_timeout(wait: Option<Duration>) -> i32 {
    match wait {
        Some(wait) => i32::try_from(wait.as_millis()).unwrap_or(i32::MAX),
        None => -1,
    }
}

/// JSON framing over a [`Channel`].
///
/// The server side reads raw frames and answers them with [`write_json`](Self::write_json).
/// The client side uses [`request`](Self::request), which keeps track of whether a reply is still
/// owed so that a second request can never be issued on top of an unanswered one.
pub struct ProtocolTransport<C: Channel> {
    channel: C,
    outstanding: bool,
}

impl<C: Channel> ProtocolTransport<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            outstanding: false,
        }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn read_frame(&mut self) -> Result<Vec<u8>, TransportError> {
        self.channel.recv_frame()
    }

    pub fn write_json<T: Serialize>(&mut self, value: &T) -> Result<(), TransportError> {
        let frame = serde_json::to_vec(value)?;
        self.channel.send_frame(&frame)
    }

    /// Send `payload` and block for exactly one reply.
    ///
    /// A timed out or interrupted exchange is abandoned and the next request may proceed. Any
    /// other receive failure leaves the reply owed, and later requests fail with
    /// [`TransportError::ReplyOutstanding`].
    pub fn request<Req, Resp>(&mut self, payload: &Req) -> Result<Resp, TransportError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        if self.outstanding {
            return Err(TransportError::ReplyOutstanding);
        }

        self.write_json(payload)?;
        self.outstanding = true;

        let frame = match self.channel.recv_frame() {
            Ok(frame) => frame,
            Err(e @ (TransportError::Timeout | TransportError::Interrupted)) => {
                self.outstanding = false;
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        self.outstanding = false;

        Ok(serde_json::from_slice(&frame)?)
    }
}


#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{testing::ScriptedChannel, *};

    #[test]
    fn request_reads_one_reply() {
        let channel = ScriptedChannel::new().then_json(json!({"status": "success"}));
        let sent = channel.sent();
        let mut transport = ProtocolTransport::new(channel);

        let reply: Value = transport.request(&json!({"action": "select"})).unwrap();

        assert_eq!(reply, json!({"status": "success"}));
        assert_eq!(sent.borrow().len(), 1);
        assert_eq!(
            serde_json::from_slice::<Value>(&sent.borrow()[0]).unwrap(),
            json!({"action": "select"})
        );
    }

    #[test]
    fn request_after_failed_receive_fails_fast() {
        let channel = ScriptedChannel::new()
            .then_err(TransportError::Closed)
            .then_json(json!({}));
        let sent = channel.sent();
        let mut transport = ProtocolTransport::new(channel);

        let first: Result<Value, _> = transport.request(&json!({}));
        assert!(matches!(first, Err(TransportError::Closed)));

        let second: Result<Value, _> = transport.request(&json!({}));
        assert!(matches!(second, Err(TransportError::ReplyOutstanding)));
        assert_eq!(sent.borrow().len(), 1);
    }

    #[test]
    fn request_after_timeout_proceeds() {
        let channel = ScriptedChannel::new()
            .then_err(TransportError::Timeout)
            .then_json(json!({"ok": true}));
        let sent = channel.sent();
        let mut transport = ProtocolTransport::new(channel);

        let first: Result<Value, _> = transport.request(&json!({}));
        assert!(matches!(first, Err(TransportError::Timeout)));

        let second: Value = transport.request(&json!({})).unwrap();
        assert_eq!(second, json!({"ok": true}));
        assert_eq!(sent.borrow().len(), 2);
    }

    #[test]
    fn request_after_interrupt_proceeds() {
        let channel = ScriptedChannel::new()
            .then_err(TransportError::Interrupted)
            .then_json(json!({"ok": true}));
        let mut transport = ProtocolTransport::new(channel);

        let first: Result<Value, _> = transport.request(&json!({}));
        assert!(matches!(first, Err(TransportError::Interrupted)));

        let second: Value = transport.request(&json!({})).unwrap();
        assert_eq!(second, json!({"ok": true}));
    }

    #[test]
    #[should_panic(expected = "Codec")]
    fn request_with_malformed_reply() {
        let channel = ScriptedChannel::new().then_raw(b"not json");
        let mut transport = ProtocolTransport::new(channel);

        let _: Value = transport.request(&json!({})).unwrap();
    }

    #[test]
    fn zmq_timeouts_are_recognised() {
        assert!(matches!(
            TransportError::from(zmq::Error::EAGAIN),
            TransportError::Timeout
        ));
        assert!(matches!(
            TransportError::from(zmq::Error::ETERM),
            TransportError::Closed
        ));
        assert!(matches!(
            TransportError::from(zmq::Error::EINTR),
            TransportError::Interrupted
        ));
    }

    #[test]
    fn socket_timeout_conversion() {
        assert_eq!(socket_timeout(None), -1);
        assert_eq!(socket_timeout(Some(Duration::from_millis(250))), 250);
        assert_eq!(socket_timeout(Some(Duration::from_secs(u64::MAX))), i32::MAX);
    }
}
