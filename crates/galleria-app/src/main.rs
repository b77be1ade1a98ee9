//! Main application entry point (native).

#[cfg(feature = "native")]
use clap::Parser;

#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(name = "galleria")]
#[command(about = "Replay a gallery interaction script", long_about = None)]
#[command(version)]
#[command(after_help = galleria_core::ShortcutRegistry::describe())]
struct Args {
    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Replay script (JSON)
    script: std::path::PathBuf,
}

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    let args = Args::parse();

    log::info!("Replaying {}", args.script.display());
    match galleria_app::replay::run_file(&args.script) {
        Ok(report) if args.json => match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        },
        Ok(report) => print!("{}", report),
        Err(e) => {
            log::error!("Replay failed: {}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
