use std::fmt::Write;

use crate::{
    Result,
    core::{NodeId, Scene},
    state::Lifecycle,
};

/// Traverses the scene tree and returns an indented string showing each
/// node's name, lifecycle, layout results and draw-order state. This is a
/// debug function.
pub fn dump(scene: &Scene) -> Result<String> {
    let mut out = String::new();
    dump_node(scene, scene.root_id(), 0, &mut out)?;
    Ok(out)
}

/// Append one node and its subtree to the dump.
fn dump_node(scene: &Scene, id: NodeId, level: usize, out: &mut String) -> Result<()> {
    let node = scene.get(id)?;
    let indent = "    ".repeat(level);

    write!(out, "{indent}{}", node.name()).unwrap();
    match node.lifecycle() {
        Lifecycle::Ready => {}
        state => write!(out, " ({state:?})").unwrap(),
    }
    if !node.enabled() {
        write!(out, " (disabled)").unwrap();
    }
    writeln!(out).unwrap();

    let pos = node.position();
    let size = node.intrinsic();
    writeln!(out, "{indent}  pos: ({}, {})", pos.x, pos.y).unwrap();
    writeln!(out, "{indent}  size: {} x {}", size.w, size.h).unwrap();
    writeln!(
        out,
        "{indent}  layer: {} z: {}{}",
        scene.global_layer(id)?,
        scene.global_z_index(id)?,
        if node.is_composition() { " (composition)" } else { "" },
    )
    .unwrap();

    for &child in node.children() {
        dump_node(scene, child, level + 1, out)?;
    }
    Ok(())
}
