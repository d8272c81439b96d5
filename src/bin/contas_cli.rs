use std::{env, path::PathBuf, process};

use contas_core::{cli, init};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        None => cli::run()?,
        Some("summary") => cli::print_summary()?,
        Some("list") => cli::print_list(args.next())?,
        Some("export") => {
            let path = args.next().map(PathBuf::from).unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            cli::export_to(path)?;
        }
        Some("version") => println!("contas_core {}", env!("CARGO_PKG_VERSION")),
        Some("help") => print_usage(),
        Some(_) => {
            print_usage();
            process::exit(1);
        }
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: contas_cli [COMMAND]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  (none)                    interactive menu");
    eprintln!("  summary                   dashboard totals and urgency lists");
    eprintln!("  list [payable|receivable] print bills, optionally by direction");
    eprintln!("  export <path>             write every bill as CSV");
    eprintln!("  version                   print the package version");
    eprintln!("  help                      this message");
}
