//! Observing: append the tool result linked to its call.

use crate::message::{Conversation, Message};

pub(super) fn observe(conversation: &mut Conversation, call_id: String, text: String) {
    conversation.push(Message::tool(call_id, text));
}
