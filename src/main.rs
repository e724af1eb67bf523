fn main() {
    if let Err(e) = medbrief::run() {
        eprintln!("medbrief: {e}");
        std::process::exit(1);
    }
}
