//! Calculus figures
//!
//! Renders the matrix-calculus figure set (chain rule, forward and reverse
//! mode, sparsity and coloring) into `figures/` as SVG and PNG.
//!
//! Settings are read from `figures.toml` in the working directory, or from
//! the file named by `CALCULUS_FIGURES_CONFIG`; both are optional.

mod config;
mod data;
mod error;
mod figures;

use matrix_diagrams::foundation::logging;

use crate::config::FiguresConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = FiguresConfig::config_path();
    let config = match FiguresConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            logging::init();
            log::error!("Failed to load {}: {e}", path.display());
            return Err(e.into());
        }
    };

    logging::init_with_level(&config.log_level);
    log::info!(
        "Rendering {} figures as {:?} into {}",
        figures::CATALOGUE.len(),
        config.formats,
        config.output_dir.display(),
    );

    match figures::run(&config) {
        Ok(written) => {
            log::info!("Wrote {} files", written.len());
            Ok(())
        }
        Err(e) => {
            log::error!("Figure run failed: {e}");
            Err(e.into())
        }
    }
}
