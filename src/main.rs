mod app;
mod components;
mod core;
mod features;
mod pages;

use app::App;
use leptos::prelude::*;

fn main() {
    // Route panics to the browser console instead of a silent wasm trap
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
