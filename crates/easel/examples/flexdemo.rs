//! Builds a small widget tree, steps one frame against the recording
//! canvas, and prints the scene dump plus the recorded draw calls.
//!
//! Run with: `cargo run --example flexdemo --features testing`

use easel::{
    Color, Engine, Length, Result,
    dump,
    geom::{Axis, Edges, Size},
    testing::RecordingCanvas,
    widgets::{Container, Decoration, Flex, FlexItem, MainAxisAlignment, Scroll},
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let mut engine = Engine::new(Size::new(320.0, 200.0));
    let scene = engine.scene_mut();
    let root = scene.root_id();

    let row: easel::NodeId = scene
        .add(
            Flex::row()
                .width(Length::Stretch)
                .height(Length::Stretch)
                .main_align(MainAxisAlignment::SpaceBetween),
        )
        .into();
    scene.attach(root, row)?;

    let sidebar: easel::NodeId = scene
        .add(
            Container::new()
                .width(Length::Px(80.0))
                .height(Length::Stretch)
                .padding(Edges::all(4.0))
                .decoration(Decoration {
                    fill: Some(Color::rgb(30, 30, 40)),
                    border: Some((1.0, Color::WHITE)),
                }),
        )
        .into();
    scene.attach(row, sidebar)?;

    let body: easel::NodeId = scene.add(FlexItem::new(1)).into();
    scene.attach(row, body)?;
    let list: easel::NodeId = scene.add(Scroll::new(Axis::Vertical)).into();
    scene.attach(body, list)?;
    let content: easel::NodeId = scene
        .add(
            Container::new()
                .width(Length::Stretch)
                .height(Length::Px(600.0))
                .decoration(Decoration {
                    fill: Some(Color::rgb(240, 240, 235)),
                    border: None,
                }),
        )
        .into();
    scene.attach(list, content)?;

    let mut canvas = RecordingCanvas::new();
    engine.step(&mut canvas)?;

    println!("{}", dump::dump(engine.scene())?);
    println!("draw calls:");
    for op in &canvas.ops {
        println!("  {op:?}");
    }
    Ok(())
}
