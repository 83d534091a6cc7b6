//! Recorded sensor streams for offline replay.
//!
//! A recording directory holds:
//!     motion.csv        - `timestamp_ms,ax,ay,az`
//!     orientation.csv   - `timestamp_ms,alpha,beta,gamma` (optional)
//!
//! No header row; `#` starts a comment. An empty cell means the platform did
//! not report that component. A motion row holding only the timestamp is an
//! event without any acceleration payload.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};

use crate::imu::{AxisReading, MotionSample, OrientationSample};
use crate::system::SensorEvent;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationEntry {
    pub timestamp_ms: f64,
    pub sample: OrientationSample,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedEvent {
    pub timestamp_ms: f64,
    pub event: SensorEvent,
}

#[derive(Debug, Default)]
pub struct Recording {
    pub motion: Vec<MotionSample>,
    pub orientation: Vec<OrientationEntry>,
}

impl Recording {
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let motion_path = root.join("motion.csv");
        let motion = parse_motion_log(
            std::fs::File::open(&motion_path)
                .with_context(|| format!("Failed to open {}", motion_path.display()))?,
        )
        .with_context(|| format!("Failed to parse {}", motion_path.display()))?;

        let orientation_path = root.join("orientation.csv");
        let orientation = if orientation_path.exists() {
            parse_orientation_log(
                std::fs::File::open(&orientation_path)
                    .with_context(|| format!("Failed to open {}", orientation_path.display()))?,
            )
            .with_context(|| format!("Failed to parse {}", orientation_path.display()))?
        } else {
            Vec::new()
        };

        Ok(Self {
            motion,
            orientation,
        })
    }

    pub fn len(&self) -> usize {
        self.motion.len() + self.orientation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Both streams interleaved by timestamp.
    ///
    /// Each stream keeps its own file order, so out-of-order rows reach the
    /// integrator exactly as recorded. Motion goes first on equal timestamps.
    pub fn events(&self) -> Vec<RecordedEvent> {
        let mut events = Vec::with_capacity(self.len());
        let mut motion = self.motion.iter().peekable();
        let mut orientation = self.orientation.iter().peekable();

        loop {
            let take_orientation = match (motion.peek(), orientation.peek()) {
                (Some(m), Some(o)) => o.timestamp_ms < m.timestamp_ms,
                (None, Some(_)) => true,
                (Some(_), None) => false,
                (None, None) => break,
            };
            if take_orientation {
                if let Some(o) = orientation.next() {
                    events.push(RecordedEvent {
                        timestamp_ms: o.timestamp_ms,
                        event: SensorEvent::Orientation(o.sample),
                    });
                }
            } else if let Some(m) = motion.next() {
                events.push(RecordedEvent {
                    timestamp_ms: m.timestamp_ms,
                    event: SensorEvent::Motion(*m),
                });
            }
        }
        events
    }
}

pub fn parse_motion_log<R: Read>(reader: R) -> Result<Vec<MotionSample>> {
    let mut rdr = csv_reader(reader);

    let mut samples = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.is_empty() {
            continue;
        }
        let timestamp_ms: f64 = rec[0].trim().parse()?;
        if rec.len() == 1 {
            samples.push(MotionSample::without_payload(timestamp_ms));
            continue;
        }
        samples.push(MotionSample::new(
            timestamp_ms,
            AxisReading {
                x: optional_cell(&rec, 1)?,
                y: optional_cell(&rec, 2)?,
                z: optional_cell(&rec, 3)?,
            },
        ));
    }
    Ok(samples)
}

pub fn parse_orientation_log<R: Read>(reader: R) -> Result<Vec<OrientationEntry>> {
    let mut rdr = csv_reader(reader);

    let mut entries = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.is_empty() {
            continue;
        }
        let timestamp_ms: f64 = rec[0].trim().parse()?;
        entries.push(OrientationEntry {
            timestamp_ms,
            sample: OrientationSample {
                alpha_deg: optional_cell(&rec, 1)?,
                beta_deg: optional_cell(&rec, 2)?,
                gamma_deg: optional_cell(&rec, 3)?,
            },
        });
    }
    Ok(entries)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader)
}

fn optional_cell(rec: &StringRecord, idx: usize) -> Result<Option<f64>> {
    match rec.get(idx).map(str::trim) {
        None | Some("") => Ok(None),
        Some(cell) => {
            let value = cell
                .parse()
                .with_context(|| format!("Invalid number {:?} in column {}", cell, idx))?;
            Ok(Some(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_motion_rows() {
        let csv = "\
# timestamp_ms,ax,ay,az
0,0.5,0,0
16.7,,0.2,
33.4
50, 1.5 ,-0.25,3
";
        let samples = parse_motion_log(csv.as_bytes()).unwrap();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], MotionSample::new(0.0, AxisReading::new(0.5, 0.0, 0.0)));
        assert_eq!(
            samples[1].acceleration,
            Some(AxisReading {
                x: None,
                y: Some(0.2),
                z: None
            })
        );
        assert_eq!(samples[2], MotionSample::without_payload(33.4));
        assert_eq!(samples[3].acceleration, Some(AxisReading::new(1.5, -0.25, 3.0)));
    }

    #[test]
    fn test_parse_orientation_rows() {
        let csv = "0,90,,-5\n10,1,2,3\n";
        let entries = parse_orientation_log(csv.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].sample.alpha_deg, Some(90.0));
        assert_eq!(entries[0].sample.beta_deg, None);
        assert_eq!(entries[0].sample.gamma_deg, Some(-5.0));
        assert_eq!(entries[1].sample, OrientationSample::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_invalid_number_is_error() {
        assert!(parse_motion_log("0,abc,0,0\n".as_bytes()).is_err());
    }

    #[test]
    fn test_events_merge_keeps_stream_order() {
        let recording = Recording {
            motion: vec![
                MotionSample::new(0.0, AxisReading::x_only(1.0)),
                MotionSample::new(20.0, AxisReading::x_only(1.0)),
                MotionSample::new(10.0, AxisReading::x_only(1.0)),
            ],
            orientation: vec![
                OrientationEntry {
                    timestamp_ms: 0.0,
                    sample: OrientationSample::default(),
                },
                OrientationEntry {
                    timestamp_ms: 15.0,
                    sample: OrientationSample::default(),
                },
            ],
        };

        let stamps: Vec<(f64, bool)> = recording
            .events()
            .iter()
            .map(|e| (e.timestamp_ms, matches!(e.event, SensorEvent::Motion(_))))
            .collect();
        assert_eq!(
            stamps,
            vec![
                (0.0, true),
                (0.0, false),
                (15.0, false),
                (20.0, true),
                (10.0, true),
            ]
        );
    }
}
