fn main() {
    if let Err(e) = sitenav::app::run_cli() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
