use std::env;

use umbra_occlusion::printer::{format_area, format_mask};
use umbra_occlusion::{catalog, AreaKey};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let result = match args.len() {
        0 => {
            print_summary();
            Ok(())
        }
        4 => run_area(&args),
        _ => {
            eprintln!("Usage: area_inspector [X0 Y0 X1 Y1]");
            std::process::exit(2);
        }
    };

    if let Err(err) = result {
        eprintln!("area_inspector error: {err}");
        std::process::exit(1);
    }
}

fn print_summary() {
    let catalog = catalog();

    println!("Areas: {}", catalog.area_count());
    println!("Sections: {}", catalog.section_count());
    println!("First entries:");

    for index in 0..8 {
        println!("  [{index}] {}", format_area(catalog.index_to_key(index)));
    }
}

fn run_area(args: &[String]) -> Result<(), String> {
    let mut bounds = [0u8; 4];

    for (slot, arg) in bounds.iter_mut().zip(args) {
        *slot = arg
            .parse()
            .map_err(|_| format!("not a grid coordinate: {arg}"))?;
    }

    let [x0, y0, x1, y1] = bounds;

    if x0 > x1 || y0 > y1 || x1 > 15 || y1 > 15 {
        return Err(format!("invalid area bounds ({x0}, {y0}) to ({x1}, {y1})"));
    }

    let key = AreaKey::new(x0, y0, x1, y1);
    let index = catalog().key_to_index(key);

    println!("{} (index {index})", format_area(key));
    print!("{}", format_mask(&key.coverage_words()));
    Ok(())
}
