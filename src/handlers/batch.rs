//! BATCH handling.
//!
//! The transport collects a batch and hands it over whole. Items of a
//! `chathistory` batch are tagged as history so they render but never
//! notify; items are then dispatched in order like any other event.

use crate::proto::{Batch, IrcMessage};
use tracing::debug;

/// Turn a completed batch into the events to dispatch.
pub fn unpack_batch(batch: Batch) -> Vec<IrcMessage> {
    let history = batch.is_chathistory();
    debug!(
        reference = %batch.reference,
        batch_type = %batch.batch_type,
        items = batch.items.len(),
        "Unpacking batch"
    );
    batch
        .items
        .into_iter()
        .map(|mut item| {
            if history {
                item.mark_history();
            }
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn privmsg(text: &str) -> IrcMessage {
        IrcMessage::new("PRIVMSG")
            .with_source("bob!b@host")
            .with_params(["#rust", text])
    }

    #[test]
    fn test_chathistory_items_tagged() {
        let mut batch = Batch::new("abc", "chathistory").with_params(["#rust"]);
        batch.push(privmsg("one"));
        batch.push(privmsg("two"));

        let items = unpack_batch(batch);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(IrcMessage::is_history));
        assert_eq!(items[1].arg(1), Some("two"));
    }

    #[test]
    fn test_other_batches_untouched() {
        let mut batch = Batch::new("n1", "netsplit");
        batch.push(privmsg("hi"));
        let items = unpack_batch(batch);
        assert!(!items[0].is_history());
    }
}
