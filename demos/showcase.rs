use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use dui::prelude::*;

fn main() {
    env_logger::init();

    let mut app = App::new(HeadlessToolkit::new(480, 320))
        .tick_interval(Duration::from_millis(16))
        .max_ticks(10);

    let clicks = Rc::new(Cell::new(0u32));
    let counter = clicks.clone();

    let click_me = button("Click me")
        .bg_color(Palette::Blue)
        .on_click(move || {
            counter.set(counter.get() + 1);
            log::info!("Button clicked {} time(s)", counter.get());
            if counter.get() == 2 {
                request_exit();
            }
        });
    // Queue a simulated pointer click; it fires on the first tick
    click_me.click();

    let root = vstack![
        text("Hello").width(200),
        click_me,
        hstack![text("Left"), button("Right")]
            .main_axis_alignment(FlexAlign::SpaceEvenly),
    ];
    app.mount(root);

    // A second click once the loop is running
    let mut sent = false;
    let click_me = app
        .root()
        .and_then(|root| root.downcast_ref::<VStack>())
        .and_then(|root| root.child_at(1))
        .and_then(|b| b.handle());
    app.on_update(move || {
        if sent {
            return;
        }
        if let Some(handle) = click_me {
            let _ = dui::toolkit::with_toolkit(|tk| {
                tk.send_event(handle, dui::toolkit::EventKind::Clicked)
            });
        }
        sent = true;
    })
    .run();

    log::info!("Clicked {} time(s) in total", clicks.get());
}
