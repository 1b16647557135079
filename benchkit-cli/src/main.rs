fn main() {
    if let Err(e) = benchkit_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
