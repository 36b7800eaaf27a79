//! Prints what the virtual keyboard watcher and an input method view report.
//!
//! Run with `RUST_LOG=debug` to also see the D-Bus traffic.

use kirigami_input_method::{Kirigami, KeyboardProperty};
use log::info;
use std::time::Duration;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let kirigami = Kirigami::from_default_config();
    let watcher = kirigami.virtual_keyboard_watcher();
    let input_method = kirigami.input_method();

    for property in KeyboardProperty::ALL {
        watcher
            .signal(property)
            .connect(move |value| println!("watcher {property:?} = {value}"));
    }
    input_method
        .type_changed()
        .connect(|ty| println!("input method type = {ty:?}"));
    input_method
        .enabled_changed()
        .connect(|enabled| println!("input method enabled = {enabled}"));
    input_method
        .active_changed()
        .connect(|active| println!("input method active = {active}"));

    info!("Initial state: {:?}", watcher.state());
    loop {
        watcher.dispatch_pending();
        std::thread::sleep(Duration::from_millis(50));
    }
}
