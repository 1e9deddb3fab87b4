//! The evaluation loop: walks a dataset directory, runs every
//! requested network on every sample, and accumulates per-network
//! error logs.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::geometry;
use crate::labels::LabelMap;
use crate::network::EvalContext;
use crate::report::EvalReport;
use crate::{Error, Result};

/// Intermediate size every sample is normalized to before being
/// fitted to a network's own input resolution without resampling.
pub const STANDARD_SIZE: u32 = 224;

#[derive(Debug, Clone)]
pub struct EvalOptions {
    pub labels_path: PathBuf,
    pub show_progress: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            labels_path: PathBuf::from("val.txt"),
            show_progress: true,
        }
    }
}

/// Runs the full evaluation: precondition checks, label loading, the
/// sample loop, and the final report. Any per-sample failure aborts
/// the run; there is no skip-and-continue.
pub fn run(ctx: &EvalContext, dataset_dir: &Path, opts: &EvalOptions) -> Result<EvalReport> {
    if !dataset_dir.is_dir() {
        return Err(Error::DatasetNotFound(dataset_dir.to_path_buf()));
    }
    if !opts.labels_path.is_file() {
        return Err(Error::LabelIndexNotFound(opts.labels_path.clone()));
    }

    let files = list_samples(dataset_dir)?;
    let first = files
        .first()
        .ok_or_else(|| Error::EmptyDataset(dataset_dir.to_path_buf()))?;

    // The dataset is assumed extension-homogeneous; the index is
    // rewritten to whatever the first file carries.
    let labels = LabelMap::load(&opts.labels_path, &extension_of(first))?;
    log::info!(
        "Testing {} networks on {} samples from {}",
        ctx.len(),
        files.len(),
        dataset_dir.display()
    );

    let mut logs: Vec<Vec<bool>> = (0..ctx.len())
        .map(|_| Vec::with_capacity(files.len()))
        .collect();
    let clock = EtaClock::start(files.len());

    for (i, file) in files.iter().enumerate() {
        let label = labels.get(file)?;
        let image = image::open(dataset_dir.join(file))?;
        let normalized = geometry::resize_normalize(&image, STANDARD_SIZE)?;

        for (net_log, net) in logs.iter_mut().zip(ctx.networks()) {
            let mut input = geometry::crop_or_pad(&normalized, net.descriptor().input_size)?;
            net.descriptor().preprocess.apply(&mut input)?;
            let predicted = net.predict(&input)?;
            net_log.push(predicted as u32 != label);
        }

        if opts.show_progress {
            print_progress(i + 1, files.len(), &logs, clock.remaining(i + 1));
        }
    }
    if opts.show_progress {
        println!();
    }

    Ok(EvalReport::from_logs(ctx, &logs))
}

/// Fraction of logged samples the network got wrong.
pub fn error_rate(log: &[bool]) -> f64 {
    if log.is_empty() {
        return 0.0;
    }
    log.iter().filter(|&&wrong| wrong).count() as f64 / log.len() as f64
}

fn list_samples(dataset_dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dataset_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    files.sort();
    Ok(files)
}

fn extension_of(filename: &str) -> String {
    match Path::new(filename).extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => String::new(),
    }
}

fn print_progress(done: usize, total: usize, logs: &[Vec<bool>], remaining: Duration) {
    let mut err_str = String::new();
    for net_log in logs {
        err_str.push_str(&format!("{:.2}% ", error_rate(net_log) * 100.0));
    }
    print!(
        "\r[ Sample {}/{} ] [ Error {}] [ TimeRemain {} ]",
        done,
        total,
        err_str,
        format_hms(remaining)
    );
    let _ = io::stdout().flush();
}

/// Linear extrapolation of the time left from the per-sample average
/// so far. Zero once the last sample completes.
#[derive(Debug)]
pub struct EtaClock {
    start: Instant,
    total: usize,
}

impl EtaClock {
    pub fn start(total: usize) -> Self {
        Self {
            start: Instant::now(),
            total,
        }
    }

    pub fn remaining(&self, completed: usize) -> Duration {
        remaining_after(self.start.elapsed(), completed, self.total)
    }
}

fn remaining_after(elapsed: Duration, completed: usize, total: usize) -> Duration {
    if completed == 0 {
        return Duration::ZERO;
    }
    let per_sample = elapsed.as_secs_f64() / completed as f64;
    Duration::from_secs_f64(per_sample * total.saturating_sub(completed) as f64)
}

pub fn format_hms(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
