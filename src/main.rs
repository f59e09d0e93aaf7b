use clap::Parser;
use privalint_cli::PrivalintCli;

fn main() {
    let cli = PrivalintCli::parse();
    if let Err(err) = cli.run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
