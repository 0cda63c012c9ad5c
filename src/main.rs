//! Budget Grid Entry Point

use budget_grid_ui::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
