//! Inventory Scanner CLI
//!
//! Command-line interface for exercising the scanner core against the
//! mock camera and detector, and for generating QR payload text for
//! label printing.

use clap::{Parser, Subcommand};
use inventory_scanner::{
    capture::{CaptureConfig, MockCamera},
    detect::{BoundingBox, CodeGeometry, Detection, MockDetector},
    overlay::{RecordingSurface, Viewport},
    payload,
    scan::{
        parse_serial_list, BorderState, Haptic, ScanConfig, ScanDriver, ScanObserver, ScanSession,
    },
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "inventory-scanner", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a demonstration scan session with mock camera input.
    Scan {
        /// Comma- or newline-separated serials to search for.
        #[arg(long, default_value = "BOX-0001,BOX-0002,BOX-0003")]
        targets: String,
        /// Number of detection ticks to run when not continuous.
        #[arg(long, default_value_t = 30)]
        ticks: u32,
        /// Keep scanning until interrupted with Ctrl-C.
        #[arg(long)]
        continuous: bool,
    },
    /// Print QR payload text for the given serials, one per line.
    Generate {
        /// Serials to encode.
        #[arg(required = true)]
        serials: Vec<String>,
    },
}

struct DemoObserver;

impl ScanObserver for DemoObserver {
    fn on_target_found(&mut self, serial: &str, found: &[String]) {
        println!("Found {} ({} so far)", serial, found.len());
    }

    fn on_border_changed(&mut self, state: BorderState) {
        info!(?state, "border state changed");
    }
}

struct LogHaptic;

impl Haptic for LogHaptic {
    fn pulse(&mut self) {
        info!("haptic pulse requested");
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Scan {
            targets,
            ticks,
            continuous,
        } => run_scan(&targets, ticks, continuous),
        Command::Generate { serials } => {
            for serial in &serials {
                println!("{}", payload::encode(serial));
            }
            info!(count = serials.len(), "payloads generated");
        }
    }
}

/// Scripts the mock detector so each target drifts into view in turn.
fn scripted_detector(serials: &[String]) -> MockDetector {
    let mut detector = MockDetector::new();
    for (i, serial) in serials.iter().enumerate() {
        for _ in 0..4 {
            detector.push_empty();
        }
        detector.push_detections(vec![Detection::new(
            payload::encode(serial),
            CodeGeometry::Rect(BoundingBox::new(
                120.0 + 40.0 * i as f64,
                160.0,
                96.0,
                96.0,
            )),
        )]);
    }
    detector
}

fn run_scan(targets: &str, ticks: u32, continuous: bool) {
    info!("Inventory Scanner v{}", inventory_scanner::VERSION);
    info!("This is a demonstration using mock camera input");

    let serials = parse_serial_list(targets);
    let scan_config = ScanConfig::default();
    let interval = scan_config.detection_interval();

    let mut session = ScanSession::new(scan_config);
    session.set_targets(targets);

    let mut driver = ScanDriver::new(MockCamera::new(), scripted_detector(&serials), session)
        .with_observer(DemoObserver)
        .with_haptic(LogHaptic);

    if let Err(e) = driver.start(&CaptureConfig::default()) {
        eprintln!("Failed to start scanning: {}", e);
        std::process::exit(1);
    }

    let running = Arc::new(AtomicBool::new(true));
    if continuous {
        let flag = Arc::clone(&running);
        if let Err(e) = ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst)) {
            warn!(error = %e, "could not install Ctrl-C handler");
        }
    }

    info!(targets = serials.len(), continuous, "scanning...");

    let viewport = Viewport::new(640.0, 480.0);
    let mut tick = 0u32;

    while running.load(Ordering::SeqCst) && (continuous || tick < ticks) {
        let now = Instant::now();
        driver.detection_tick(now);

        // A fresh surface per tick; a real embedder redraws its canvas.
        let mut surface = RecordingSurface::new();
        driver.render_tick(&mut surface, viewport, now);

        std::thread::sleep(interval);
        tick += 1;
    }

    let stats = driver.session().stats();
    let found = driver.session().found().to_vec();
    driver.stop();

    info!(
        frames = stats.frames_processed,
        detections = stats.detections_total,
        decode_failures = stats.decode_failures,
        "scan demo complete"
    );

    if found.is_empty() {
        println!("No targets found");
    } else {
        println!("Found serials (in order of first match):");
        for serial in found {
            println!("  {}", serial);
        }
    }
}
