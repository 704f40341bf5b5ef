use std::collections::HashMap;

use geom::Size;

use crate::{
    core::NodeId,
    error::{Error, Result},
};

/// Default ceiling for the off-screen surface pool.
pub const DEFAULT_SURFACE_LIMIT: usize = 64;

/// Handle to a pooled off-screen surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(usize);

impl SurfaceId {
    /// The surface's index in the pool.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One pooled surface record.
struct Surface {
    /// Current target size.
    size: Size,
    /// Whether the surface backs a live composition.
    in_use: bool,
}

/// A bounded pool of off-screen surfaces backing composition boundaries.
///
/// A registry maps the owning node to its surface while the composition
/// context is live; releasing returns the surface to the idle pool. Growth
/// beyond the ceiling is a fatal error: it signals a composition leak, not
/// a legitimate shortage.
pub struct SurfacePool {
    /// Pooled surface records.
    surfaces: Vec<Surface>,
    /// Live registry: owning node to surface.
    live: HashMap<NodeId, SurfaceId>,
    /// Growth ceiling.
    limit: usize,
}

impl SurfacePool {
    /// Construct a pool with the default ceiling.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_SURFACE_LIMIT)
    }

    /// Construct a pool with an explicit ceiling.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            surfaces: Vec::new(),
            live: HashMap::new(),
            limit,
        }
    }

    /// The configured ceiling.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of surfaces backing live compositions.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of allocated but idle surfaces.
    pub fn idle_count(&self) -> usize {
        self.surfaces.iter().filter(|s| !s.in_use).count()
    }

    /// Acquire a surface for a composition node, reusing an idle one when
    /// possible.
    pub fn acquire(&mut self, node: NodeId, size: Size) -> Result<SurfaceId> {
        if self.live.contains_key(&node) {
            return Err(Error::DuplicateComposition(node));
        }
        let id = if let Some(idx) = self.surfaces.iter().position(|s| !s.in_use) {
            let surface = &mut self.surfaces[idx];
            surface.size = size;
            surface.in_use = true;
            SurfaceId(idx)
        } else if self.surfaces.len() < self.limit {
            self.surfaces.push(Surface { size, in_use: true });
            SurfaceId(self.surfaces.len() - 1)
        } else {
            return Err(Error::SurfacePoolExhausted { limit: self.limit });
        };
        self.live.insert(node, id);
        Ok(id)
    }

    /// The surface backing a live composition node.
    pub fn lookup(&self, node: NodeId) -> Result<SurfaceId> {
        self.live
            .get(&node)
            .copied()
            .ok_or_else(|| Error::UnknownLookup {
                kind: "surface",
                name: format!("{node:?}"),
            })
    }

    /// The target size of a pooled surface.
    pub fn size_of(&self, id: SurfaceId) -> Result<Size> {
        self.surfaces
            .get(id.0)
            .map(|s| s.size)
            .ok_or_else(|| Error::UnknownLookup {
                kind: "surface",
                name: format!("{id:?}"),
            })
    }

    /// Return a node's surface to the idle pool.
    pub fn release(&mut self, node: NodeId) -> Result<()> {
        let id = self.lookup(node)?;
        self.live.remove(&node);
        if let Some(surface) = self.surfaces.get_mut(id.0) {
            surface.in_use = false;
        }
        Ok(())
    }

    /// Return every surface to the idle pool, dropping the registry. Runs
    /// at the start of each render-tree build.
    pub fn release_all(&mut self) {
        self.live.clear();
        for surface in &mut self.surfaces {
            surface.in_use = false;
        }
    }
}
