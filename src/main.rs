use anyhow::{Context, Result};

use ar_pose::config::TrackerConfig;
use ar_pose::io::Recording;
use ar_pose::system::{ArSession, Ungated};

/// Print telemetry every this many replayed events.
const REPORT_EVERY: usize = 10;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let recording_path = args
        .next()
        .unwrap_or_else(|| "data/recording".to_string());

    let config = match args.next() {
        Some(path) => TrackerConfig::from_yaml_file(&path)?,
        None => TrackerConfig::default(),
    };

    println!("Loading sensor recording from: {}", recording_path);
    let recording = Recording::load(&recording_path)?;
    println!(
        "Loaded {} motion samples, {} orientation samples",
        recording.motion.len(),
        recording.orientation.len()
    );
    println!(
        "Config: threshold={:?}, friction={}, timestamps={:?}, mode={:?}",
        config.noise_threshold.axes(),
        config.friction,
        config.timestamp_policy,
        config.mode
    );

    let mut session = ArSession::new(config);
    // Desktop replay has no permission prompt.
    let subscription = session
        .start(&mut Ungated)
        .context("Failed to start sensor session")?;

    // One render frame per event: push, drain, read the pose.
    for (i, recorded) in recording.events().into_iter().enumerate() {
        subscription.push(recorded.event);
        session.process_pending();
        let pose = session.frame();

        if i % REPORT_EVERY == 0 {
            println!(
                "Event {} (t={:.1} ms): camera at [{:.3}, {:.3}, {:.3}]",
                i, recorded.timestamp_ms, pose.position.x, pose.position.y, pose.position.z
            );
            println!("{}", session.telemetry());
        }
    }

    println!("{}", session.telemetry());
    println!(
        "Done! {} samples processed, {} skipped",
        session.tracker().samples_processed(),
        session.tracker().samples_skipped()
    );

    subscription.cancel();
    session.stop();

    Ok(())
}
