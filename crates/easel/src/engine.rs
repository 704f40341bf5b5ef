use std::collections::HashMap;

use geom::{Rect, Size};

use crate::{
    compose::{RenderTree, RenderTreeManager, SurfacePool},
    core::{Scene, UpdateContext, tree, tree::Walk},
    error::{Error, Result},
    pipeline::{Phase, Pipeline},
    render::{self, Canvas},
    state::Lifecycle,
    widgets::Root,
};

/// One engine instance: the scene arena, the frame pipeline, the render
/// tree, the surface pool, and the engine-wide registries.
///
/// Everything hangs off this struct rather than process-wide globals, so
/// multiple engines coexist and tests construct them freely. The host's
/// frame driver calls [`Engine::step`] once per animation frame.
pub struct Engine {
    /// The node arena.
    scene: Scene,
    /// Per-frame phase schedule.
    pipeline: Pipeline,
    /// Render-tree builder and retained tree.
    manager: RenderTreeManager,
    /// Off-screen surface pool for composition boundaries.
    surfaces: SurfacePool,
    /// Named viewport registry.
    viewports: HashMap<String, Rect>,
    /// Frames stepped so far.
    frame: u64,
}

impl Engine {
    /// Construct an engine whose scene root carries a [`Root`] widget sized
    /// to the given viewport.
    pub fn new(size: Size) -> Self {
        let mut scene = Scene::new();
        let root = scene.root_id();
        scene
            .set_widget(root, Root::new(size))
            .expect("root node exists");
        Self {
            scene,
            pipeline: Pipeline::new(),
            manager: RenderTreeManager::new(),
            surfaces: SurfacePool::new(),
            viewports: HashMap::new(),
            frame: 0,
        }
    }

    /// Read access to the scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the scene.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The frame pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Mutable access to the frame pipeline.
    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    /// The off-screen surface pool.
    pub fn surfaces(&self) -> &SurfacePool {
        &self.surfaces
    }

    /// The most recently built render tree.
    pub fn render_tree(&self) -> &RenderTree {
        self.manager.tree()
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Resize the root viewport and request a layout pass.
    pub fn set_root_size(&mut self, size: Size) -> Result<()> {
        let root = self.scene.root_id();
        self.scene.with_widget_mut(root, |widget, scene| {
            let root_widget = widget
                .downcast_mut::<Root>()
                .ok_or_else(|| Error::Internal("root widget is not a Root".into()))?;
            root_widget.set_size(size);
            scene.request_refresh();
            Ok(())
        })?
    }

    /// Register a named viewport region. Registering a name twice is a
    /// programmer error.
    pub fn register_viewport(&mut self, name: &str, rect: Rect) -> Result<()> {
        if self.viewports.contains_key(name) {
            return Err(Error::DuplicateViewport(name.into()));
        }
        self.viewports.insert(name.into(), rect);
        Ok(())
    }

    /// Look up a named viewport region.
    pub fn viewport(&self, name: &str) -> Result<Rect> {
        self.viewports
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownLookup {
                kind: "viewport",
                name: name.into(),
            })
    }

    /// Run one frame through the pipeline phases in priority order.
    pub fn step(&mut self, canvas: &mut dyn Canvas) -> Result<()> {
        self.frame += 1;
        let phases: Vec<Phase> = self.pipeline.phases().collect();
        for phase in phases {
            tracing::trace!(frame = self.frame, ?phase, "frame phase");
            match phase {
                Phase::Update => self.run_update()?,
                Phase::BatchFree => self.scene.sweep_free()?,
                Phase::BuildRenderTree => {
                    let root = self.scene.root_id();
                    self.manager.build(&self.scene, &mut self.surfaces, root)?;
                }
                Phase::Paint => {
                    render::paint_tree(&mut self.scene, self.manager.tree(), &self.surfaces, canvas)?;
                }
            }
        }
        Ok(())
    }

    /// Run every live widget's update hook, in preorder. Disabled subtrees
    /// and nodes already flagged for teardown are skipped.
    fn run_update(&mut self) -> Result<()> {
        let root = self.scene.root_id();
        let mut ids = Vec::new();
        tree::preorder::<()>(&mut self.scene, root, &mut |scene, id| {
            let node = scene.get(id)?;
            if !node.enabled() || node.lifecycle() == Lifecycle::Destroying {
                return Ok(Walk::Skip);
            }
            ids.push(id);
            Ok(Walk::Continue)
        })?;
        for id in ids {
            // A node may have been freed by an earlier update this frame.
            if self.scene.lifecycle(id) != Lifecycle::Ready || !self.scene.has_widget(id) {
                continue;
            }
            self.scene.with_widget_mut(id, |widget, scene| {
                let mut ctx = UpdateContext::new(scene, id);
                widget.update(&mut ctx)
            })??;
        }
        Ok(())
    }
}
