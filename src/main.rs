//! Pantheon viewer binary: loads options and runs the 3D scene.

use std::path::{Path, PathBuf};

use pantheon::{options::Options, Viewer};

fn load_options(path: &Path) -> Options {
    match Options::load(path) {
        Ok(options) => {
            log::info!("Loaded options from {}", path.display());
            options
        }
        Err(e) => {
            log::error!("{}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let options = match args.next().as_deref() {
        Some("--schema") => {
            let path = args
                .next()
                .map_or_else(|| PathBuf::from("options.schema.json"), PathBuf::from);
            if let Err(e) = Options::write_json_schema(&path) {
                log::error!("{e}");
                std::process::exit(1);
            }
            log::info!("Wrote options schema to {}", path.display());
            return;
        }
        Some(path) => load_options(Path::new(path)),
        None => Options::default(),
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
