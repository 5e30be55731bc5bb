fn main() {
    if let Err(e) = geoformat_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
