//! Rotation Reflow Demo
//!
//! Simulates a device rotating between portrait and landscape and shows
//! which reflows actually fire: same-class width changes rescale rows
//! without a breakpoint notification, and repeating a size is a no-op.
//! Runtime events are logged as JSON lines through a memory sink and
//! dumped at the end.
//!
//! ```bash
//! cargo run --example rotation
//! ```

use gridstrap::{
    BoxMargin, Breakpoint, Column, ContainerLayout, Logger, MemorySink, RecordingSink,
    ReflowConfig, ReflowController, RowOptions, Size, Span,
};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let log = MemorySink::new();
    let mut config = ReflowConfig::default();
    config.logger = Some(Logger::new(log.clone()));
    config.enable_metrics();
    let metrics = config.metrics_handle().expect("metrics enabled");

    let mut screen = ContainerLayout::new().with_margin(BoxMargin::none());
    screen.attach(Size::new(834.0, 1194.0), None, false);
    screen.add_row(
        vec![
            Column::new("master", Span::FULL).for_size(Breakpoint::Lg, Span::of(4)),
            Column::new("detail", Span::FULL).for_size(Breakpoint::Lg, Span::of(8)),
        ],
        RowOptions::default(),
    );

    let mut controller = ReflowController::with_config(config);
    controller.add_container(screen);
    let mut sink = RecordingSink::new();

    let script = [
        Size::new(834.0, 1194.0),  // portrait -> md, stacked
        Size::new(1194.0, 834.0),  // landscape -> lg, side by side
        Size::new(1194.0, 834.0),  // repeat -> no-op
        Size::new(1080.0, 810.0),  // split view -> still lg, widths rescale
        Size::new(834.0, 1194.0),  // back to portrait
    ];

    for size in script {
        let outcome = controller.handle_resize(size, &mut sink)?;
        println!(
            "width {:>6} -> class {:?}, reflowed: {}, applied: {}",
            size.width, outcome.class, outcome.reflowed, outcome.applied
        );
    }

    let master = controller
        .applied_placement("master")
        .expect("master placed");
    println!(
        "master ends at {}px wide (new_line: {})",
        master.placement.width, master.placement.new_line
    );

    let snapshot = metrics
        .lock()
        .expect("metrics lock")
        .snapshot(std::time::Duration::ZERO);
    println!(
        "reflows: {}, placements applied: {}",
        snapshot.reflows, snapshot.placements_applied
    );

    println!("-- runtime log --");
    for event in log.events() {
        println!("{}", serde_json::to_string(&event)?);
    }

    Ok(())
}
