mod color;
mod config;
mod core;
mod render;
mod types;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    ui::run()
}
