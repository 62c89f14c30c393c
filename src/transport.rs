//! Downstream sinks for solved poses.
//!
//! Whatever ships poses to hardware or draws them only sees an ordered
//! stream of `JointAngles`; encoding and device handling live on the other
//! side of this interface.

use std::future::Future;

use futures::channel::mpsc;
use futures::SinkExt;

use crate::error::TransportError;
use crate::types::JointAngles;

pub trait JointSink {
    fn send(&mut self, angles: &JointAngles) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Receiving half of a [`ChannelSink`]; a `Stream` of poses in send order.
pub type JointStream = mpsc::Receiver<JointAngles>;

/// Bounded channel sink. Sending waits while the receiver is `capacity`
/// poses behind.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<JointAngles>,
}

impl ChannelSink {
    pub fn new(capacity: usize) -> (Self, JointStream) {
        let (tx, rx) = mpsc::channel(capacity);
        (ChannelSink { tx }, rx)
    }
}

impl JointSink for ChannelSink {
    fn send(&mut self, angles: &JointAngles) -> impl Future<Output = Result<(), TransportError>> + Send {
        let angles = *angles;
        async move { self.tx.send(angles).await.map_err(|_| TransportError::Closed) }
    }
}

/// Keeps every pose it is given.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    sent: Vec<JointAngles>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[JointAngles] {
        &self.sent
    }
}

impl JointSink for RecordingSink {
    fn send(&mut self, angles: &JointAngles) -> impl Future<Output = Result<(), TransportError>> + Send {
        self.sent.push(*angles);
        std::future::ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn channel_delivers_in_order() {
        let (mut sink, mut stream) = ChannelSink::new(4);
        let first = JointAngles::from_array([0.0, 10.0, 20.0, 30.0]);
        let second = JointAngles::from_array([0.0, 11.0, 21.0, 31.0]);
        sink.send(&first).await.unwrap();
        sink.send(&second).await.unwrap();
        drop(sink);

        assert_eq!(stream.next().await, Some(first));
        assert_eq!(stream.next().await, Some(second));
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn closed_receiver_is_reported() {
        let (mut sink, stream) = ChannelSink::new(1);
        drop(stream);
        let err = sink.send(&JointAngles::default()).await.unwrap_err();
        assert_eq!(err, TransportError::Closed);
    }

    #[tokio::test]
    async fn recording_sink_keeps_everything() {
        let mut sink = RecordingSink::new();
        for i in 0..3 {
            sink.send(&JointAngles::from_array([0.0, i as f64, 0.0, 0.0])).await.unwrap();
        }
        let shoulders: Vec<f64> = sink.sent().iter().map(|a| a.shoulder).collect();
        assert_eq!(shoulders, vec![0.0, 1.0, 2.0]);
    }
}
