//! Shared test doubles for the dispatch pipeline.

// Not every test binary uses every helper here.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use egress::http::transport::{PreparedRequest, Transport};
use egress::http::{HttpError, ResponseBuffer};

/// One scripted reply from the fake network.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with this status and body.
    Status(u16, &'static str),
    /// Fail at the transport level with this message.
    ConnectError(&'static str),
}

/// Transport double that serves scripted replies in order and records every
/// request it sees.
///
/// The last reply repeats once the script is exhausted, so a de-duplicated
/// call that unexpectedly reaches the network still shows up in the log
/// instead of panicking.
pub struct ScriptedTransport {
    replies: Vec<Reply>,
    log: Arc<Mutex<Vec<PreparedRequest>>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> Self {
        assert!(!replies.is_empty(), "script needs at least one reply");
        Self {
            replies,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn single(status: u16, body: &'static str) -> Self {
        Self::new(vec![Reply::Status(status, body)])
    }

    pub fn failing(message: &'static str) -> Self {
        Self::new(vec![Reply::ConnectError(message)])
    }

    /// Handle to the request log; clone before moving the transport into a
    /// context.
    pub fn log(&self) -> Arc<Mutex<Vec<PreparedRequest>>> {
        self.log.clone()
    }
}

impl Transport for ScriptedTransport {
    fn execute(
        &mut self,
        request: &PreparedRequest,
        buffer: &mut ResponseBuffer,
    ) -> Result<u16, HttpError> {
        self.log.lock().unwrap().push(request.clone());

        let reply = if self.replies.len() > 1 {
            self.replies.remove(0)
        } else {
            self.replies[0].clone()
        };

        match reply {
            Reply::Status(status, body) => {
                buffer.append(body.as_bytes())?;
                Ok(status)
            }
            Reply::ConnectError(message) => Err(HttpError::Transport(message.to_string())),
        }
    }
}

/// Calls observed so far.
pub fn call_count(log: &Arc<Mutex<Vec<PreparedRequest>>>) -> usize {
    log.lock().unwrap().len()
}
