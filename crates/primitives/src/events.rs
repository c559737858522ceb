//! Events emitted by state transitions for the enclosing transaction context.

use serde::{Deserialize, Serialize};

/// Type of the generic event emitted for every successfully handled message.
pub const EVENT_TYPE_MESSAGE: &str = "message";

/// Attribute key for the module that handled the message.
pub const ATTRIBUTE_KEY_MODULE: &str = "module";

/// Attribute key for the sender of the message.
pub const ATTRIBUTE_KEY_SENDER: &str = "sender";

/// Attribute key for an amount of tokens.
pub const ATTRIBUTE_KEY_AMOUNT: &str = "amount";

/// A key/value pair attached to an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// The attribute key.
    pub key: String,

    /// The attribute value.
    pub value: String,
}

/// A typed event with its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The event type.
    pub kind: String,

    /// The attributes in emission order.
    pub attributes: Vec<Attribute>,
}

impl Event {
    /// Creates an event without attributes.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push(Attribute {
            key: key.into(),
            value: value.to_string(),
        });

        self
    }

    /// Returns the value of the first attribute with the given key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }
}
