//! Message passing between the widget, popup and worker
//!
//! Each context owns the receiving half of a mailbox; other contexts hold a
//! cloneable [`Port`]. Fire-and-forget requests carry no reply channel,
//! request/response actions carry a oneshot the handler answers on.

pub mod protocol;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

pub use protocol::{Endpoint, MentorContext, Request, Response};

/// Errors from delivering a request or waiting for its reply
#[derive(Debug, Error)]
pub enum MessagingError {
    /// Nobody is listening on the other side (context unloaded)
    #[error("No listener for {action} on {endpoint}")]
    Disconnected { endpoint: &'static str, action: &'static str },

    /// The handler dropped the request without replying
    #[error("{action} was dropped without a response")]
    NoResponse { action: &'static str },

    /// The reply did not match the request
    #[error("Unexpected response to {action}")]
    UnexpectedResponse { action: &'static str },
}

/// A request in flight, with its reply channel when one is expected
#[derive(Debug)]
pub struct Envelope {
    pub request: Request,
    reply: Option<oneshot::Sender<Response>>,
}

impl Envelope {
    /// Split into the request and a [`Responder`]
    pub fn into_parts(self) -> (Request, Responder) {
        (self.request, Responder { reply: self.reply })
    }
}

/// Answers a request; a no-op for fire-and-forget actions
#[derive(Debug)]
pub struct Responder {
    reply: Option<oneshot::Sender<Response>>,
}

impl Responder {
    /// Send the reply, returns `false` when nobody is waiting for it
    pub fn respond(self, response: Response) -> bool {
        match self.reply {
            Some(tx) => tx.send(response).is_ok(),
            None => false,
        }
    }
}

/// Receiving half of a context's mailbox
pub type Inbox = mpsc::UnboundedReceiver<Envelope>;

/// Sending half of a context's mailbox
#[derive(Debug, Clone)]
pub struct Port {
    name: &'static str,
    tx: mpsc::UnboundedSender<Envelope>,
}

/// Create a mailbox for a context
pub fn mailbox(name: &'static str) -> (Port, Inbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Port { name, tx }, rx)
}

impl Port {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Deliver a request without waiting for anything back
    pub fn send(&self, request: Request) -> Result<(), MessagingError> {
        let action = request.action();
        self.tx
            .send(Envelope { request, reply: None })
            .map_err(|_| MessagingError::Disconnected { endpoint: self.name, action })
    }

    /// Deliver a request and hand back the channel its reply will arrive on
    ///
    /// Lets synchronous callers (the UI loop) poll for the answer.
    pub fn dispatch(&self, request: Request) -> Result<PendingReply, MessagingError> {
        let action = request.action();
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply: Some(reply_tx) })
            .map_err(|_| MessagingError::Disconnected { endpoint: self.name, action })?;
        Ok(PendingReply { action, rx: reply_rx })
    }

    /// Deliver a request and wait for its reply
    pub async fn request(&self, request: Request) -> Result<Response, MessagingError> {
        self.dispatch(request)?.wait().await
    }
}

/// A reply that has not arrived yet
#[derive(Debug)]
pub struct PendingReply {
    action: &'static str,
    rx: oneshot::Receiver<Response>,
}

impl PendingReply {
    pub fn action(&self) -> &'static str {
        self.action
    }

    /// Wait for the reply
    pub async fn wait(self) -> Result<Response, MessagingError> {
        self.rx.await.map_err(|_| MessagingError::NoResponse { action: self.action })
    }

    /// Check for the reply without blocking; `Ok(None)` while still pending
    pub fn poll(&mut self) -> Result<Option<Response>, MessagingError> {
        match self.rx.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(oneshot::error::TryRecvError::Empty) => Ok(None),
            Err(oneshot::error::TryRecvError::Closed) => {
                Err(MessagingError::NoResponse { action: self.action })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn request_gets_reply() {
        let (port, mut inbox) = mailbox("content");

        let handler = tokio::spawn(async move {
            let envelope = inbox.recv().await.unwrap();
            let (request, responder) = envelope.into_parts();
            assert_eq!(request, Request::GetCurrentProblem);
            responder.respond(Response::CurrentProblem { problem_title: Some("Two Sum".into()) })
        });

        let response = port.request(Request::GetCurrentProblem).await.unwrap();
        assert_eq!(response, Response::CurrentProblem { problem_title: Some("Two Sum".into()) });
        assert!(handler.await.unwrap());
    }

    #[tokio::test]
    async fn fire_and_forget_has_no_reply() {
        let (port, mut inbox) = mailbox("content");
        port.send(Request::ToggleWidget).unwrap();

        let (request, responder) = inbox.recv().await.unwrap().into_parts();
        assert_eq!(request, Request::ToggleWidget);
        assert!(!responder.respond(Response::MentorAnswer { response: String::new() }));
    }

    #[test]
    fn closed_mailbox_is_disconnected() {
        let (port, inbox) = mailbox("worker");
        drop(inbox);

        let err = port.send(Request::ToggleWidget).unwrap_err();
        assert!(matches!(err, MessagingError::Disconnected { endpoint: "worker", .. }));
        assert!(port.dispatch(Request::GetCurrentProblem).is_err());
    }

    #[test]
    fn dropped_request_reports_no_response() {
        let (port, mut inbox) = mailbox("content");
        let mut pending = port.dispatch(Request::GetCurrentProblem).unwrap();
        assert!(matches!(pending.poll(), Ok(None)));

        drop(inbox.try_recv().unwrap());
        assert!(matches!(pending.poll(), Err(MessagingError::NoResponse { .. })));
    }
}
