//! Deferred configuration blocks
//!
//! Blocks recorded while the application boots go to the front queue; every
//! other block goes to the back queue. Replaying runs the front queue, then the
//! back queue, each in registration order, against a fresh declaration.

use crate::builder::ModelBuilder;
use crate::declaration::ModelDeclaration;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Configuration closure applied to a model's builder
pub type ConfigBlock = Arc<dyn Fn(&mut ModelBuilder<'_>) + Send + Sync>;

/// When a block was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOrigin {
    /// While the application booted
    Boot,
    /// Any time after boot
    AdHoc,
}

/// A configuration block plus where it was defined
#[derive(Clone)]
pub struct DeferredBlock {
    block: ConfigBlock,
    origin: BlockOrigin,
    location: &'static Location<'static>,
}

impl DeferredBlock {
    /// Record `block`, remembering the caller's location
    #[track_caller]
    pub fn new(block: ConfigBlock, origin: BlockOrigin) -> Self {
        Self {
            block,
            origin,
            location: Location::caller(),
        }
    }

    pub fn origin(&self) -> BlockOrigin {
        self.origin
    }

    /// Source location the block was recorded from
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub fn apply(&self, builder: &mut ModelBuilder<'_>) {
        (self.block)(builder)
    }
}

impl fmt::Debug for DeferredBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredBlock")
            .field("origin", &self.origin)
            .field("location", &format_args!("{}", self.location))
            .finish()
    }
}

/// Front (boot) and back (ad-hoc) queues of one model
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    front: Vec<DeferredBlock>,
    back: Vec<DeferredBlock>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the queue matching the block's origin
    pub fn enqueue(&mut self, block: DeferredBlock) {
        match block.origin {
            BlockOrigin::Boot => self.front.push(block),
            BlockOrigin::AdHoc => self.back.push(block),
        }
    }

    /// Blocks in replay order
    pub fn iter(&self) -> impl Iterator<Item = &DeferredBlock> {
        self.front.iter().chain(self.back.iter())
    }

    pub fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.back.is_empty()
    }

    /// Replay every block into a fresh declaration
    pub fn replay(&self) -> ModelDeclaration {
        let mut declaration = ModelDeclaration::default();
        let mut builder = ModelBuilder::new(&mut declaration);
        for block in self.iter() {
            block.apply(&mut builder);
        }
        declaration
    }
}
