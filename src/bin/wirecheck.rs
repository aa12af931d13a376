use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    if let Err(e) = wirecheck::cli::run_cli() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
