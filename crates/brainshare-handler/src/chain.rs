//! The ordered handler chain.
//!
//! Handlers are an explicit ordered list rather than links holding a
//! reference to "the next handler": dispatch feeds each handler the
//! previous one's output. A handler that does not recognize a message
//! returns it untouched, which is the fall-through.

use async_trait::async_trait;

use brainshare_didcomm::Message;

use crate::context::HandlerContext;
use crate::error::HandlerError;

/// One link in the dispatch chain.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Inspect and possibly mutate a message. Return it (annotated or
    /// not) for the next handler; never error for an unrecognized type.
    async fn handle(
        &self,
        message: Message,
        context: &HandlerContext,
    ) -> Result<Message, HandlerError>;
}

/// An ordered list of handlers applied in sequence.
#[derive(Default)]
pub struct HandlerChain {
    handlers: Vec<Box<dyn MessageHandler>>,
}

impl HandlerChain {
    /// Empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler; runs after every handler already added.
    pub fn with(mut self, handler: impl MessageHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Run every handler in order over the message.
    pub async fn dispatch(
        &self,
        mut message: Message,
        context: &HandlerContext,
    ) -> Result<Message, HandlerError> {
        for handler in &self.handlers {
            message = handler.handle(message, context).await?;
        }
        Ok(message)
    }
}
