//! Log capture for the Console window
//!
//! [`ConsoleLayer`] is a `tracing_subscriber` layer that copies every event
//! into a bounded in-memory buffer. The Console window reads the buffer each
//! frame.

use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Oldest messages are dropped past this many entries
pub const MAX_MESSAGES: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct LogMessage {
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogMessage {
    pub fn color(&self) -> [f32; 4] {
        match self.level {
            Level::ERROR => [1.0, 0.3, 0.3, 1.0],
            Level::WARN => [1.0, 0.8, 0.3, 1.0],
            Level::INFO => [0.85, 0.85, 0.85, 1.0],
            Level::DEBUG => [0.5, 0.75, 1.0, 1.0],
            Level::TRACE => [0.6, 0.6, 0.6, 1.0],
        }
    }
}

/// Bounded list of captured messages
#[derive(Debug)]
pub struct ConsoleBuffer {
    messages: VecDeque<LogMessage>,
    capacity: usize,
}

impl ConsoleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity.min(MAX_MESSAGES)),
            capacity,
        }
    }

    pub fn push(&mut self, message: LogMessage) {
        if self.capacity == 0 {
            return;
        }
        while self.messages.len() >= self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    pub fn messages(&self) -> impl Iterator<Item = &LogMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

static CONSOLE: Lazy<Mutex<ConsoleBuffer>> =
    Lazy::new(|| Mutex::new(ConsoleBuffer::new(MAX_MESSAGES)));

/// Run `f` with the shared console buffer
pub fn with_console<R>(f: impl FnOnce(&mut ConsoleBuffer) -> R) -> R {
    // A poisoned buffer still holds valid messages
    let mut buffer = CONSOLE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut buffer)
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Layer feeding the Console window
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLayer;

impl ConsoleLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let metadata = event.metadata();
        let message = LogMessage {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message + &visitor.fields,
        };
        with_console(|buffer| buffer.push(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    fn message(text: &str) -> LogMessage {
        LogMessage {
            level: Level::INFO,
            target: "test".to_string(),
            message: text.to_string(),
        }
    }

    #[test]
    fn test_buffer_is_bounded() {
        let mut buffer = ConsoleBuffer::new(3);
        for i in 0..5 {
            buffer.push(message(&i.to_string()));
        }
        let texts: Vec<_> = buffer.messages().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_layer_captures_message_and_fields() {
        let subscriber = tracing_subscriber::registry().with(ConsoleLayer::new());
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(entity = 7, "console capture check");
        });

        let captured = with_console(|buffer| {
            buffer
                .messages()
                .find(|m| m.message.starts_with("console capture check"))
                .cloned()
        })
        .unwrap();
        assert_eq!(captured.level, Level::WARN);
        assert_eq!(captured.message, "console capture check entity=7");
    }
}
