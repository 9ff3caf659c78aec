//! pinch_volume — interactive entry point.

use pinch_volume::app::{run, AppConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Pinch Volume — thumb/index gesture control          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "camera")]
    println!("  Frames: webcam");
    #[cfg(not(feature = "camera"))]
    println!("  Frames: synthetic  (use --features camera for a webcam)");
    #[cfg(feature = "leap")]
    println!("  Hands:  LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Hands:  mouse simulation  (Up/Down = pinch, H = hide)");
    println!("  Press Q in the window to quit.");
    println!();

    let cfg = AppConfig::default();
    println!("  Volume: {:?} backend, range {}", cfg.backend, cfg.gesture.vol_range);
    println!();

    if let Err(e) = run(cfg) {
        error!(error = %e, "fatal");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
