use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    // the fragment looks like `#--rows=5&--cols=4`, the leading empty piece stands in for argv[0]
    let (args, parse_error) = match Args::try_parse_from(location_hash.split(['#', '&'])) {
        Ok(args) => (args, None),
        Err(err) => (Args::parse_from([""]), Some(err)),
    };

    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = parse_error {
        log::error!("Ignoring invalid arguments {:?}: {}", location_hash, err);
    }
    log::debug!("args: {:?}", args.game);

    let root = document()
        .get_element_by_id("board")
        .expect("Could not find id=\"board\" element");

    log::debug!("App started");
    yew::Renderer::<game::BoardView>::with_root_and_props(root, args.game).render();
}
