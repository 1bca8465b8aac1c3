//! Dashboard Layout Demo
//!
//! Builds a bootstrap-style dashboard (header, nav/feed/aside, tile grid,
//! footer) and reflows it across phone, tablet, and large-tablet widths.
//! Applied placements are printed as JSON lines, the same format a host
//! binding would consume.
//!
//! ```bash
//! cargo run --example dashboard
//! ```

use std::io;

use gridstrap::{
    BoxMargin, Breakpoint, Column, ContainerLayout, JsonLinesSink, MarginStep, ReflowController,
    RowOptions, Size, Span,
};

const HEADER: &str = "header";
const NAV: &str = "nav";
const FEED: &str = "feed";
const ASIDE: &str = "aside";
const FOOTER: &str = "footer";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut screen = ContainerLayout::new().with_margin(BoxMargin::uniform(MarginStep::One));
    screen.attach(Size::new(390.0, 844.0), None, true);

    screen.add_row(
        vec![Column::new(HEADER, Span::FULL).with_height(64.0).named(HEADER)],
        RowOptions::default(),
    );
    screen.add_row(
        vec![
            // Nav collapses to full width on phones, aside disappears.
            Column::new(NAV, Span::FULL)
                .for_size(Breakpoint::Md, Span::of(3))
                .named(NAV),
            Column::new(FEED, Span::FULL)
                .for_size(Breakpoint::Md, Span::of(6))
                .named(FEED),
            Column::new(ASIDE, Span::ZERO)
                .for_size(Breakpoint::Md, Span::of(3))
                .named(ASIDE),
        ],
        RowOptions::default(),
    );
    screen.add_row(
        vec![
            Column::new("tile-a", Span::of(6)).for_size(Breakpoint::Lg, Span::of(4)).square(),
            Column::new("tile-b", Span::of(6)).for_size(Breakpoint::Lg, Span::of(4)).square(),
            Column::new("tile-c", Span::FULL).for_size(Breakpoint::Lg, Span::of(4)).square(),
        ],
        RowOptions::default(),
    );
    screen.add_row(
        vec![Column::new(FOOTER, Span::FULL).with_height(40.0).named(FOOTER)],
        RowOptions {
            anchor_to_bottom: true,
            ..RowOptions::default()
        },
    );

    let mut controller = ReflowController::new();
    controller.add_container(screen);
    let mut sink = JsonLinesSink::new(io::stdout());

    for size in [
        Size::new(390.0, 844.0),   // phone portrait -> xs
        Size::new(834.0, 1194.0),  // tablet portrait -> md
        Size::new(1194.0, 834.0),  // tablet landscape -> lg
    ] {
        let outcome = controller.handle_resize(size, &mut sink)?;
        eprintln!(
            "-- width {} -> {:?}, {} placements applied",
            size.width, outcome.class, outcome.applied
        );
    }

    // Dynamic removal: drop the aside and let the feed reflow.
    controller.remove_element_named(ASIDE, &mut sink)?;
    eprintln!("-- removed '{ASIDE}'");

    Ok(())
}
