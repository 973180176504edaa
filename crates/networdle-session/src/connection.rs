//! Connection lifecycle: framed send/receive with a close-once guarantee.
//!
//! A session can end in many places: a bad first message, a dropped
//! client, a write that fails halfway through the final score. Each of
//! those paths closes the connection, and some of them close it twice
//! (the failing write closes it, then the session's exit path closes it
//! again). [`ManagedConnection`] makes that safe: the first `close` shuts
//! the stream, every later one is a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use networdle_transport::{Connection, ConnectionId, TransportError};

use crate::SessionError;

/// A connection owned by exactly one session.
pub struct ManagedConnection<C: Connection<Error = TransportError>> {
    conn: C,
    closed: AtomicBool,
}

impl<C: Connection<Error = TransportError>> ManagedConnection<C> {
    /// Takes ownership of `conn`.
    pub fn new(conn: C) -> Self {
        Self {
            conn,
            closed: AtomicBool::new(false),
        }
    }

    /// The underlying connection's ID.
    pub fn id(&self) -> ConnectionId {
        self.conn.id()
    }

    /// The underlying connection.
    pub fn inner(&self) -> &C {
        &self.conn
    }

    /// Returns `true` once [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Encodes `message` as a frame and writes it.
    ///
    /// # Errors
    /// [`SessionError::Closed`] if the connection is already closed;
    /// [`SessionError::Transport`] if the write fails, in which case the
    /// connection is closed before returning.
    pub async fn send(&self, message: &str) -> Result<(), SessionError> {
        if self.is_closed() {
            return Err(SessionError::Closed);
        }

        let frame = networdle_protocol::encode(message);
        if let Err(e) = self.conn.send(&frame).await {
            tracing::debug!(id = %self.id(), error = %e, "send failed");
            self.close().await;
            return Err(e.into());
        }

        tracing::trace!(id = %self.id(), message, "sent");
        Ok(())
    }

    /// Receives exactly one frame, waiting as long as it takes.
    ///
    /// # Errors
    /// [`SessionError::ConnectionClosed`] if the peer closed the stream,
    /// [`SessionError::Transport`] if the read fails. Either way the
    /// connection is closed before returning.
    pub async fn receive(&self) -> Result<Vec<u8>, SessionError> {
        if self.is_closed() {
            return Err(SessionError::Closed);
        }

        match self.conn.recv().await {
            Ok(Some(frame)) => Ok(frame),
            Ok(None) => {
                tracing::debug!(id = %self.id(), "peer closed the connection");
                self.close().await;
                Err(SessionError::ConnectionClosed)
            }
            Err(e) => {
                tracing::debug!(id = %self.id(), error = %e, "receive failed");
                self.close().await;
                Err(e.into())
            }
        }
    }

    /// Receives exactly one frame, giving up after `deadline`.
    ///
    /// # Errors
    /// As for [`receive`](Self::receive), plus [`SessionError::Timeout`]
    /// when the deadline passes. The connection is closed in every error
    /// case.
    pub async fn receive_within(
        &self,
        deadline: Duration,
    ) -> Result<Vec<u8>, SessionError> {
        match tokio::time::timeout(deadline, self.receive()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!(id = %self.id(), ?deadline, "receive timed out");
                self.close().await;
                Err(SessionError::Timeout(deadline))
            }
        }
    }

    /// Closes the connection. Only the first call does anything.
    ///
    /// Returns `true` if this call performed the close. A failure to shut
    /// the stream is logged; the connection counts as closed regardless.
    pub async fn close(&self) -> bool {
        if self.closed.swap(true, Ordering::AcqRel) {
            return false;
        }
        if let Err(e) = self.conn.close().await {
            tracing::debug!(id = %self.id(), error = %e, "close failed");
        }
        tracing::debug!(id = %self.id(), "connection closed");
        true
    }
}

impl<C: Connection<Error = TransportError>> Drop for ManagedConnection<C> {
    fn drop(&mut self) {
        // `close` is async and can't run here. Dropping `conn` below
        // releases the stream, which is all a close would have done.
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::debug!(
                id = %self.conn.id(),
                "connection dropped without explicit close"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use tokio::sync::Mutex;

    use super::*;

    /// A scripted connection that records what was sent and how often it
    /// was closed.
    struct ScriptedConnection {
        incoming: Mutex<VecDeque<Result<Option<Vec<u8>>, TransportError>>>,
        sent: Arc<Mutex<Vec<Vec<u8>>>>,
        closes: Arc<AtomicUsize>,
        fail_sends: bool,
    }

    impl ScriptedConnection {
        fn new(
            incoming: Vec<Result<Option<Vec<u8>>, TransportError>>,
        ) -> Self {
            Self {
                incoming: Mutex::new(incoming.into()),
                sent: Arc::new(Mutex::new(Vec::new())),
                closes: Arc::new(AtomicUsize::new(0)),
                fail_sends: false,
            }
        }
    }

    impl Connection for ScriptedConnection {
        type Error = TransportError;

        async fn send(&self, data: &[u8]) -> Result<(), TransportError> {
            if self.fail_sends {
                return Err(TransportError::SendFailed(
                    std::io::ErrorKind::BrokenPipe.into(),
                ));
            }
            self.sent.lock().await.push(data.to_vec());
            Ok(())
        }

        async fn recv(&self) -> Result<Option<Vec<u8>>, TransportError> {
            match self.incoming.lock().await.pop_front() {
                Some(next) => next,
                // Nothing scripted: behave like a silent peer.
                None => std::future::pending().await,
            }
        }

        async fn close(&self) -> Result<(), TransportError> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn id(&self) -> ConnectionId {
            ConnectionId::new(1)
        }
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let conn = ScriptedConnection::new(vec![]);
        let closes = Arc::clone(&conn.closes);
        let managed = ManagedConnection::new(conn);

        assert!(managed.close().await);
        assert!(!managed.close().await);
        assert!(!managed.close().await);

        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert!(managed.is_closed());
    }

    #[tokio::test]
    async fn test_send_encodes_frame() {
        let conn = ScriptedConnection::new(vec![]);
        let sent = Arc::clone(&conn.sent);
        let managed = ManagedConnection::new(conn);

        managed.send("INVALID GUESS").await.unwrap();

        assert_eq!(*sent.lock().await, vec![b"INVALID GUESS\n".to_vec()]);
    }

    #[tokio::test]
    async fn test_failed_send_closes_once() {
        let mut conn = ScriptedConnection::new(vec![]);
        conn.fail_sends = true;
        let closes = Arc::clone(&conn.closes);
        let managed = ManagedConnection::new(conn);

        let err = managed.send("_____").await.unwrap_err();
        assert!(matches!(err, SessionError::Transport(_)));
        assert!(managed.is_closed());

        // The session's own exit path closes again; nothing happens.
        assert!(!managed.close().await);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_send_after_close_is_rejected() {
        let managed = ManagedConnection::new(ScriptedConnection::new(vec![]));
        managed.close().await;
        assert!(matches!(
            managed.send("GAME OVER").await,
            Err(SessionError::Closed)
        ));
        assert!(matches!(managed.receive().await, Err(SessionError::Closed)));
    }

    #[tokio::test]
    async fn test_receive_returns_frame_bytes() {
        let managed = ManagedConnection::new(ScriptedConnection::new(vec![
            Ok(Some(b"CRANE\n".to_vec())),
        ]));
        assert_eq!(managed.receive().await.unwrap(), b"CRANE\n");
        assert!(!managed.is_closed());
    }

    #[tokio::test]
    async fn test_receive_eof_is_fatal() {
        let conn = ScriptedConnection::new(vec![Ok(None)]);
        let closes = Arc::clone(&conn.closes);
        let managed = ManagedConnection::new(conn);

        assert!(matches!(
            managed.receive().await,
            Err(SessionError::ConnectionClosed)
        ));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_receive_error_is_fatal() {
        let managed = ManagedConnection::new(ScriptedConnection::new(vec![
            Err(TransportError::ReceiveFailed(
                std::io::ErrorKind::ConnectionReset.into(),
            )),
        ]));
        assert!(matches!(
            managed.receive().await,
            Err(SessionError::Transport(_))
        ));
        assert!(managed.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_receive_within_times_out_and_closes() {
        let conn = ScriptedConnection::new(vec![]);
        let closes = Arc::clone(&conn.closes);
        let managed = ManagedConnection::new(conn);

        let err = managed
            .receive_within(Duration::from_secs(30))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Timeout(d) if d == Duration::from_secs(30)));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_drop_without_close_does_not_call_close() {
        let conn = ScriptedConnection::new(vec![]);
        let closes = Arc::clone(&conn.closes);
        drop(ManagedConnection::new(conn));
        assert_eq!(closes.load(Ordering::SeqCst), 0);
    }
}
