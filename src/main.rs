fn main() {
    if let Err(err) = switchsvg::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
