//! CLI tool for textframe - renders a delta headlessly and outputs JSON
//!
//! Usage:
//!   textframe_cli <input.json>              # Output JSON to stdout
//!   textframe_cli <input.json> -o out.json  # Output JSON to file
//!
//! The input holds the editor contents, optional render settings and the
//! natural size of every image border slots may reference:
//!
//! ```json
//! { "delta": {"ops": [{"insert": "Hello\n"}]},
//!   "settings": {"border": {"colorMode": "images"}},
//!   "images": {"vine": {"width": 40, "height": 10}} }
//! ```
//!
//! The output is `{width, height, lines, commands}`. Set `RUST_LOG=debug`
//! to see render summaries on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::{self, Write};

use serde::Deserialize;
use textframe::render::{render_display_list, ImageRef};
use textframe::RenderSettings;

#[derive(Deserialize)]
struct ImageSize {
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct Input {
    delta: serde_json::Value,
    #[serde(default)]
    settings: RenderSettings,
    #[serde(default)]
    images: HashMap<String, ImageSize>,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: textframe_cli <input.json> [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    // Read input file
    let data = match fs::read_to_string(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let input: Input = match serde_json::from_str(&data) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Error parsing input: {}", e);
            std::process::exit(1);
        }
    };

    let images: HashMap<String, ImageRef> = input
        .images
        .into_iter()
        .map(|(id, size)| {
            let image = ImageRef::new(id.clone(), size.width, size.height);
            (id, image)
        })
        .collect();

    // Render
    let list = match render_display_list(&input.delta.to_string(), &input.settings, &images) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error rendering: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("canvas {}x{}, {} draw call(s)", list.width, list.height, list.commands.len());

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&list) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
