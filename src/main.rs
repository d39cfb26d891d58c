//! Desktop front-end for the connection game engine
//!
//! Usage: `bridges [personality.json]`. Log verbosity follows `RUST_LOG`.

use bridges::ui::BridgesApp;
use bridges::Personality;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    let filter = EnvFilter::from_default_env().add_directive(
        "bridges=info"
            .parse()
            .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
    );
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let personality = match std::env::args().nth(1) {
        Some(path) => Personality::load_or_default(path),
        None => Personality::default(),
    };
    tracing::info!(personality = %personality.name, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Bridges"),
        ..Default::default()
    };

    eframe::run_native(
        "Bridges",
        options,
        Box::new(move |cc| Ok(Box::new(BridgesApp::new(cc, personality)))),
    )
}
