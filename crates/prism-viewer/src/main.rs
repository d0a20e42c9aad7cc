mod app;
mod config;
mod driver;
mod panel;
mod scene;
mod stats;

#[cfg(test)]
mod testing;

use prism_engine::device::GpuInit;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::window::{Runtime, RuntimeConfig};

use crate::app::ViewerApp;
use crate::config::ViewerOptions;

fn main() {
    init_logging(LoggingConfig::default());

    let app = ViewerApp::new(ViewerOptions::default());
    if let Err(e) = Runtime::run(RuntimeConfig::default(), GpuInit::default(), app) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
