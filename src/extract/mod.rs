//! Pulls order objects out of fenced code blocks in a completion.

use log::debug;
use serde_json::Value;

use crate::domain::OrderDraft;
use crate::execution::errors::PipelineError;

const FENCE: &str = "```";
const TAG: &str = "json";

/// Single left-to-right pass over the fenced blocks of `text`.
///
/// A block opens at "```", optionally tagged `json`, followed by a newline,
/// and closes at the next "```". Unterminated blocks are never yielded.
pub struct FencedBlocks<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> FencedBlocks<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for FencedBlocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while self.pos < self.text.len() {
            let open = self.pos + self.text[self.pos..].find(FENCE)?;
            let after = &self.text[open + FENCE.len()..];
            let header = if after.starts_with(TAG) { TAG.len() } else { 0 };

            if !after[header..].starts_with('\n') {
                // Not an opening fence; retry from the next backtick.
                self.pos = open + 1;
                continue;
            }

            let body_start = open + FENCE.len() + header + 1;
            return match self.text[body_start..].find(FENCE) {
                Some(len) => {
                    self.pos = body_start + len + FENCE.len();
                    Some(&self.text[body_start..body_start + len])
                }
                None => {
                    self.pos = self.text.len();
                    None
                }
            };
        }
        None
    }
}

/// Parse every fenced block of `completion` as a JSON object.
///
/// Blocks that are not valid JSON, or not a JSON object, are skipped.
/// The shape of each object is not checked here.
pub fn extract_orders(completion: &str) -> Result<Vec<OrderDraft>, PipelineError> {
    let mut drafts = Vec::new();

    for (block, raw) in FencedBlocks::new(completion).enumerate() {
        match serde_json::from_str::<Value>(raw.trim()) {
            Ok(Value::Object(body)) => drafts.push(OrderDraft::new(block, body)),
            Ok(other) => debug!("⏭️  Block {} is JSON but not an object: {}", block, other),
            Err(e) => debug!("⏭️  Block {} is not valid JSON: {}", block, e),
        }
    }

    if drafts.is_empty() {
        return Err(PipelineError::NoValidOrders);
    }

    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, Side};
    use serde_json::json;

    #[test]
    fn single_tagged_block_between_prose() {
        let text = "Here:\n```json\n{\"amount\":10,\"side\":\"buy\",\"price\":136.5,\"expiry\":10,\"aftertime\":0}\n```\nDone.";
        let drafts = extract_orders(text).unwrap();

        assert_eq!(drafts.len(), 1);
        assert_eq!(
            drafts[0].order().unwrap(),
            Order {
                amount: 10.0,
                side: Side::Buy,
                price: 136.5,
                expiry: 10,
                aftertime: 0,
            }
        );
    }

    #[test]
    fn broken_sibling_does_not_abort_extraction() {
        let text = "```json\n{\"amount\":10,\"side\":\"buy\",\"price\":136.5,\"expiry\":10,\"aftertime\":0}\n```\nand\n```json\n{\"amount\":10,\"side\":\n```";
        let drafts = extract_orders(text).unwrap();

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].block, 0);
    }

    #[test]
    fn keeps_only_parsable_blocks_in_order() {
        let text = concat!(
            "```json\n{\"n\": 1}\n```\n",
            "prose\n",
            "```\nnot json at all\n```\n",
            "```\n{\"n\": 2}\n```\n",
            "```json\n[1, 2, 3]\n```\n",
            "```json\n{\"n\": 3}\n```",
        );
        let drafts = extract_orders(text).unwrap();

        let ns: Vec<_> = drafts.iter().map(|d| d.body["n"].clone()).collect();
        assert_eq!(ns, vec![json!(1), json!(2), json!(3)]);
        let blocks: Vec<_> = drafts.iter().map(|d| d.block).collect();
        assert_eq!(blocks, vec![0, 2, 4]);
    }

    #[test]
    fn no_blocks_is_no_valid_orders() {
        let err = extract_orders("I would not trade today.").unwrap_err();
        assert!(matches!(err, PipelineError::NoValidOrders));
        assert!(matches!(extract_orders(""), Err(PipelineError::NoValidOrders)));
    }

    #[test]
    fn only_broken_blocks_is_no_valid_orders() {
        let err = extract_orders("```json\n{oops}\n```\n```\n\n```").unwrap_err();
        assert!(matches!(err, PipelineError::NoValidOrders));
    }

    #[test]
    fn unterminated_fence_is_not_a_block() {
        let text = "```json\n{\"amount\": 1}\n";
        assert_eq!(FencedBlocks::new(text).count(), 0);
        assert!(extract_orders(text).is_err());
    }

    #[test]
    fn other_language_tags_are_not_openings() {
        let text = "```python\nprint(1)\n```";
        // The closing fence of the python block is followed by end of text,
        // so nothing opens there either.
        assert_eq!(FencedBlocks::new(text).count(), 0);
    }

    #[test]
    fn inline_fences_are_not_openings() {
        let text = "wrap it in ```json and ``` please\n```json\n{\"a\": 1}\n```";
        let blocks: Vec<_> = FencedBlocks::new(text).collect();
        assert_eq!(blocks, vec!["{\"a\": 1}\n"]);
    }

    #[test]
    fn body_is_trimmed_before_parsing() {
        let drafts = extract_orders("```\n\n   {\"a\": 1}   \n\n```").unwrap();
        assert_eq!(drafts[0].to_json(), json!({"a": 1}));
    }

    #[test]
    fn off_shape_objects_pass_through() {
        let drafts = extract_orders("```json\n{\"explanation\": \"none\"}\n```").unwrap();
        assert_eq!(drafts.len(), 1);
        assert!(drafts[0].order().is_err());
    }

    #[test]
    fn empty_block_body_is_skipped() {
        let text = "```json\n```\n```json\n{\"a\": 1}\n```";
        let drafts = extract_orders(text).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].block, 1);
    }
}
