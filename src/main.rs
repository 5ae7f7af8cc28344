fn main() {
    if let Err(e) = waf_console_lib::run() {
        eprintln!("waf-console: {e:#}");
        std::process::exit(1);
    }
}
