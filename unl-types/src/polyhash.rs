use serde::{Deserialize, Serialize};

/// A run of cell ids sharing one precision inside a polyhash.
///
/// `data` holds delta-encoded entries: the first entry of a whole polyhash is
/// a full cell id, every later entry only carries the characters that differ
/// from the id decoded right before it.
///
/// # Examples
///
/// ```
/// use unl_types::polyhash::PolyhashBlock;
///
/// let block = PolyhashBlock::new(5, vec!["tjb".into(), "8".into()]);
/// assert_eq!(block.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolyhashBlock {
    /// Length of every fully expanded cell id in this block
    pub precision: usize,
    /// Delta-encoded suffixes
    pub data: Vec<String>,
}

impl PolyhashBlock {
    pub fn new(precision: usize, data: Vec<String>) -> Self {
        Self { precision, data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
