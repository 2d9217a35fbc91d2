//! Raw stream pumps from child pipes into an [`OutputHub`].
//!
//! Hugo (like most Go tools) can emit non-UTF8 bytes, so pumps forward raw
//! chunks and leave decoding to subscribers. A pump keeps draining its pipe
//! after every subscriber has gone, so the child never blocks on a full pipe.

use rhugo_core::{OutputChunk, OutputStream};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tracing::debug;

use super::hub::OutputHub;

const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Spawn a task that reads `reader` until EOF, publishing each read.
pub fn spawn_output_pump(
    mut reader: impl AsyncRead + Unpin + Send + 'static,
    stream: OutputStream,
    hub: Arc<OutputHub>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut buf = vec![0u8; READ_BUFFER_SIZE];

        loop {
            match reader.read(&mut buf).await {
                Ok(0) => break, // EOF
                Ok(n) => {
                    hub.publish(OutputChunk {
                        stream,
                        data: buf[..n].to_vec(),
                    });
                }
                Err(e) => {
                    debug!(stream = stream.as_str(), error = %e, "output pump exiting due to read error");
                    break;
                }
            }
        }

        debug!(stream = stream.as_str(), "output pump task exiting");
    })
}
