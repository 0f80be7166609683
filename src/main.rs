fn main() {
    std::process::exit(uvstart::run_cli());
}
