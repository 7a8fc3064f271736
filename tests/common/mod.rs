#![allow(dead_code)]

use dui::prelude::*;
use dui::toolkit::{with_toolkit, HeadlessProbe};
use dui::widgets::Color;

pub fn setup() -> (App, HeadlessProbe) {
    let _ = env_logger::builder().is_test(true).try_init();
    let toolkit = HeadlessToolkit::default();
    let probe = toolkit.probe();
    (App::new(toolkit), probe)
}

pub fn native_parent(handle: NodeHandle) -> Option<NodeHandle> {
    with_toolkit(|tk| tk.parent(handle)).unwrap()
}

pub fn native_child(handle: NodeHandle, index: usize) -> Option<NodeHandle> {
    with_toolkit(|tk| tk.child(handle, index)).unwrap()
}

pub fn native_width(handle: NodeHandle) -> Option<Length> {
    with_toolkit(|tk| tk.width(handle)).unwrap()
}

pub fn native_height(handle: NodeHandle) -> Option<Length> {
    with_toolkit(|tk| tk.height(handle)).unwrap()
}

pub fn native_bg_color(handle: NodeHandle) -> Option<Color> {
    with_toolkit(|tk| tk.bg_color(handle)).unwrap()
}

pub fn is_valid(handle: NodeHandle) -> bool {
    with_toolkit(|tk| tk.is_valid(handle)).unwrap()
}
