use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info};

use super::profile::ThrustProfile;
use super::ThrustCurveError;

// ---------------------------------------------------------------------------
// Raw thrust curve: (time, thrust) samples as published by motor vendors
// ---------------------------------------------------------------------------

/// Raw, possibly irregular thrust samples before resampling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThrustCurve {
    samples: Vec<(f64, f64)>,
    skipped: usize,
}

impl ThrustCurve {
    /// Wrap samples already in memory. Nothing is filtered here;
    /// non-finite pairs are dropped by [`ThrustProfile::build`].
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self {
            samples: samples.into_iter().collect(),
            skipped: 0,
        }
    }

    /// Parse a two-column `time, thrust` CSV.
    ///
    /// Header lines, comments and any other row whose first two fields are not
    /// both numbers are skipped. Extra columns are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ThrustCurveError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut samples = Vec::new();
        let mut skipped = 0;

        for result in rdr.byte_records() {
            let record = match result {
                Ok(record) => record,
                Err(err) => match err.into_kind() {
                    csv::ErrorKind::Io(io) => return Err(io.into()),
                    kind => {
                        debug!("skipping unreadable thrust curve row: {kind:?}");
                        skipped += 1;
                        continue;
                    }
                },
            };

            match (parse_field(record.get(0)), parse_field(record.get(1))) {
                (Some(t), Some(f)) => samples.push((t, f)),
                _ => {
                    let line = record.position().map_or(0, |p| p.line());
                    debug!("skipping non-numeric thrust curve row at line {line}");
                    skipped += 1;
                }
            }
        }

        Ok(Self { samples, skipped })
    }

    /// Open and parse a thrust curve CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ThrustCurveError> {
        let path = path.as_ref();
        let curve = Self::from_reader(File::open(path)?)?;
        info!(
            "Loaded thrust curve '{}': {} samples, peak {:.2} N ({} rows skipped)",
            path.display(),
            curve.samples.len(),
            curve.peak_thrust(),
            curve.skipped
        );
        Ok(curve)
    }

    pub fn samples(&self) -> &[(f64, f64)] {
        &self.samples
    }

    /// Rows dropped while parsing.
    pub fn skipped_rows(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Peak thrust across the raw samples, N.
    pub fn peak_thrust(&self) -> f64 {
        self.samples
            .iter()
            .map(|&(_, f)| f)
            .filter(|f| f.is_finite())
            .fold(0.0_f64, f64::max)
    }

    /// Resample onto the uniform simulation grid.
    pub fn resample(&self, dt: f64, max_time: f64) -> Result<ThrustProfile, ThrustCurveError> {
        ThrustProfile::build(&self.samples, dt, max_time)
    }
}

fn parse_field(field: Option<&[u8]>) -> Option<f64> {
    std::str::from_utf8(field?)
        .ok()?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
