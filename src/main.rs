// decafc: parse a Decaf source file and print its parse tree

use std::env;
use std::fs;
use std::path::Path;
use std::process;

use decafc::printer;
use decafc::{parse_source, FrontendError};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("decafc");
        eprintln!("Usage: {} <input> [output]", program_name);
        eprintln!();
        eprintln!("Parses the Decaf source file <input> and writes its parse tree");
        eprintln!("to [output], or to stdout when no output file is given.");
        process::exit(1);
    }

    let input = &args[1];
    let output = args.get(2).map(|s| s.as_str());

    if !Path::new(input).exists() {
        eprintln!("Error: File '{}' not found", input);
        process::exit(1);
    }

    if let Err(e) = run(input, output) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(input: &str, output: Option<&str>) -> Result<(), FrontendError> {
    let source = fs::read_to_string(input)?;
    let tree = parse_source(&source)?;
    let rendered = printer::render(&tree);

    match output {
        Some(path) => fs::write(path, rendered)?,
        None => print!("{}", rendered),
    }

    Ok(())
}
