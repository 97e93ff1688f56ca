use std::process;

fn main() {
    // `run` drops every loaded script and task before returning
    let code = kmak::cli::run();
    process::exit(code);
}
