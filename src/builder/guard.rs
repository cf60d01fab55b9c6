use std::ops::{Deref, DerefMut};

use super::PipelineBuilder;
use crate::stencil::StencilSettings;

/// Removes every color and coverage stage added to the bound builder after the bind.
///
/// While bound, the guard is the only way to reach the builder, so nested guards are bound
/// through it and released innermost first.
///
/// ```
/// use drawstate::{ConstColorMode, ConstColorProcessor, Color, PipelineBuilder, ScopedEffectGuard};
///
/// let mut builder = PipelineBuilder::new();
/// {
///     let mut guard = ScopedEffectGuard::new(&mut builder);
///     let fp = ConstColorProcessor::new(Color::WHITE, ConstColorMode::ModulateA);
///     guard.add_color_processor(fp);
///     assert_eq!(guard.num_color_stages(), 1);
/// }
/// assert_eq!(builder.num_color_stages(), 0);
/// ```
#[derive(Debug)]
pub struct ScopedEffectGuard<'a> {
    builder: Option<&'a mut PipelineBuilder>,
    color_count: usize,
    coverage_count: usize,
}

impl<'a> ScopedEffectGuard<'a> {
    /// A guard bound to nothing; dropping it does nothing.
    pub fn unbound() -> Self {
        Self {
            builder: None,
            color_count: 0,
            coverage_count: 0,
        }
    }

    pub fn new(builder: &'a mut PipelineBuilder) -> Self {
        let mut guard = Self::unbound();
        guard.bind(Some(builder));
        guard
    }

    /// Restores the currently bound builder (if any), then captures `builder`.
    pub fn bind(&mut self, builder: Option<&'a mut PipelineBuilder>) {
        if let Some(prev) = self.builder.take() {
            prev.end_effect_scope(self.color_count, self.coverage_count);
        }
        if let Some(next) = builder {
            let (color_count, coverage_count) = next.begin_effect_scope();
            self.color_count = color_count;
            self.coverage_count = coverage_count;
            self.builder = Some(next);
        }
    }

    pub fn is_bound(&self) -> bool {
        self.builder.is_some()
    }

    /// Stage counts that will be restored on release.
    pub fn saved_counts(&self) -> (usize, usize) {
        (self.color_count, self.coverage_count)
    }
}

impl Drop for ScopedEffectGuard<'_> {
    fn drop(&mut self) {
        self.bind(None);
    }
}

impl Deref for ScopedEffectGuard<'_> {
    type Target = PipelineBuilder;

    fn deref(&self) -> &PipelineBuilder {
        match &self.builder {
            Some(b) => b,
            None => panic!("ScopedEffectGuard is not bound"),
        }
    }
}

impl DerefMut for ScopedEffectGuard<'_> {
    fn deref_mut(&mut self) -> &mut PipelineBuilder {
        match &mut self.builder {
            Some(b) => b,
            None => panic!("ScopedEffectGuard is not bound"),
        }
    }
}

/// Writes the bound builder's stencil settings back on release, discarding changes made while
/// bound.
#[derive(Debug)]
pub struct ScopedStencilGuard<'a> {
    builder: Option<&'a mut PipelineBuilder>,
    saved: StencilSettings,
}

impl<'a> ScopedStencilGuard<'a> {
    pub fn unbound() -> Self {
        Self {
            builder: None,
            saved: StencilSettings::disabled(),
        }
    }

    pub fn new(builder: &'a mut PipelineBuilder) -> Self {
        let mut guard = Self::unbound();
        guard.bind(Some(builder));
        guard
    }

    pub fn bind(&mut self, builder: Option<&'a mut PipelineBuilder>) {
        if let Some(prev) = self.builder.take() {
            prev.end_stencil_scope(self.saved);
        }
        if let Some(next) = builder {
            self.saved = next.begin_stencil_scope();
            self.builder = Some(next);
        }
    }

    pub fn is_bound(&self) -> bool {
        self.builder.is_some()
    }

    pub fn saved(&self) -> &StencilSettings {
        &self.saved
    }
}

impl Drop for ScopedStencilGuard<'_> {
    fn drop(&mut self) {
        self.bind(None);
    }
}

impl Deref for ScopedStencilGuard<'_> {
    type Target = PipelineBuilder;

    fn deref(&self) -> &PipelineBuilder {
        match &self.builder {
            Some(b) => b,
            None => panic!("ScopedStencilGuard is not bound"),
        }
    }
}

impl DerefMut for ScopedStencilGuard<'_> {
    fn deref_mut(&mut self) -> &mut PipelineBuilder {
        match &mut self.builder {
            Some(b) => b,
            None => panic!("ScopedStencilGuard is not bound"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/builder/guard.rs"]
mod tests;
