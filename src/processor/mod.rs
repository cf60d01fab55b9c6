//! Fragment processors and the stages that hold them.
//!
//! Processors are externally implemented and shared by `Rc`: the caller that created one and
//! every stage holding it keep it alive together.

pub mod effects;

use std::fmt;
use std::rc::Rc;

use crate::analysis::InvariantOutput;

pub use effects::{
    ConstColorMode, ConstColorProcessor, FilterMode, SimpleTextureEffect, TextureParams, TileMode,
};

/// A unit that transforms an input color or coverage into an output during rasterization.
///
/// Only the static contract is visible here; code generation lives in the backend.
pub trait FragmentProcessor: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Rewrites `inout` to describe this processor's output given the described input.
    fn compute_invariant_output(&self, inout: &mut InvariantOutput);

    fn will_read_dst(&self) -> bool {
        false
    }

    fn will_read_fragment_position(&self) -> bool {
        false
    }
}

/// One entry of a color or coverage chain. Immutable once built.
#[derive(Clone, Debug)]
pub struct FragmentStage {
    processor: Rc<dyn FragmentProcessor>,
}

impl FragmentStage {
    pub fn new(processor: Rc<dyn FragmentProcessor>) -> Self {
        Self { processor }
    }

    pub fn processor(&self) -> &Rc<dyn FragmentProcessor> {
        &self.processor
    }

    pub fn name(&self) -> &'static str {
        self.processor.name()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/processor/stage.rs"]
mod tests;
