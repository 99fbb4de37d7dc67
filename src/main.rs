fn main() {
    if let Err(err) = rentalqa::cli::main() {
        eprintln!("❌ Error: {err}");
        std::process::exit(1);
    }
}
