use std::collections::HashMap;

use crate::color::Color;

/// Opaque identifier of a host resource (a color or a dimension).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u32);

/// Resolves host resource ids into raw values.
///
/// The builder's `*_res` methods only resolve through this trait and then
/// forward to their plain counterparts.
pub trait ResourceResolver {
    fn resolve_color(&self, id: ResourceId) -> Option<Color>;

    /// Dimension in pixels. Callers truncate it to whole pixels.
    fn resolve_dimension(&self, id: ResourceId) -> Option<f32>;
}

/// In-memory [`ResourceResolver`].
#[derive(Clone, Debug, Default)]
pub struct ResourceTable {
    colors: HashMap<ResourceId, Color, fxhash::FxBuildHasher>,
    dimensions: HashMap<ResourceId, f32, fxhash::FxBuildHasher>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_color(&mut self, id: ResourceId, color: Color) -> &mut Self {
        self.colors.insert(id, color);
        self
    }

    pub fn insert_dimension(&mut self, id: ResourceId, px: f32) -> &mut Self {
        self.dimensions.insert(id, px);
        self
    }
}

impl ResourceResolver for ResourceTable {
    fn resolve_color(&self, id: ResourceId) -> Option<Color> {
        self.colors.get(&id).copied()
    }

    fn resolve_dimension(&self, id: ResourceId) -> Option<f32> {
        self.dimensions.get(&id).copied()
    }
}
