//! Batch processing
//!
//! A batch moves through four phases: the input file is read and filtered
//! (validating), the per-run folder is chosen and created (resolving), each
//! line is generated in order (processing) and the counts are returned
//! (summarizing). Items never share state; a failing line is recorded and
//! the loop moves on.

use std::fs;
use std::path::{Path, PathBuf};

use crate::generate::write_to;
use crate::paths::{batch_item_filename, resolve_batch_dir};
use crate::request::GenerationRequest;
use crate::{Config, Error, Result};

/// Progress notifications emitted while a batch runs
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// Processing is about to start
    Started { total: usize, output_directory: &'a Path },
    /// An item was written
    ItemSucceeded { index: usize, total: usize, data: &'a str, path: &'a Path },
    /// An item failed; the batch continues
    ItemFailed { index: usize, total: usize, data: &'a str, error: &'a Error },
    /// All items have been attempted
    Finished { success_count: usize, failed_count: usize },
}

/// Result of one line
#[derive(Debug)]
pub struct ItemOutcome {
    /// 1-based position among non-blank lines
    pub index: usize,
    pub data: String,
    pub result: Result<PathBuf>,
}

/// Summary of a finished batch
#[derive(Debug)]
pub struct BatchResult {
    pub success_count: usize,
    pub failed_count: usize,
    pub output_directory: PathBuf,
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchResult {
    /// True when every item succeeded
    pub fn is_success(&self) -> bool {
        self.failed_count == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Read a batch file, keeping trimmed non-blank lines in order
pub fn read_batch_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_batch_lines(&content))
}

/// Trim every line and drop the blank ones
pub fn parse_batch_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// A batch ready to run
#[derive(Debug)]
pub struct BatchJob {
    pub source_lines: Vec<String>,
    pub output_directory: PathBuf,
    /// Shared options; `data` is replaced per line
    pub template: GenerationRequest,
}

impl BatchJob {
    /// Read the batch file, resolve the run folder and create it.
    pub fn prepare(
        batch_file: &Path,
        output: Option<&str>,
        template: GenerationRequest,
        config: &Config,
        now_ms: u128,
    ) -> Result<Self> {
        let source_lines = read_batch_lines(batch_file)?;
        if source_lines.is_empty() {
            return Err(Error::Validation(vec![format!(
                "Batch file is empty: {}",
                batch_file.display()
            )]));
        }

        let cwd = std::env::current_dir()?;
        let output_directory =
            resolve_batch_dir(batch_file, output, &config.export_dir, &cwd, now_ms);
        fs::create_dir_all(&output_directory)?;

        tracing::debug!(
            lines = source_lines.len(),
            "batch folder {}",
            output_directory.display()
        );

        Ok(Self {
            source_lines,
            output_directory,
            template,
        })
    }

    /// Generate every line in order, reporting progress through `on_event`.
    pub fn run<F>(&self, mut on_event: F) -> BatchResult
    where
        F: FnMut(BatchEvent<'_>),
    {
        let total = self.source_lines.len();
        on_event(BatchEvent::Started {
            total,
            output_directory: &self.output_directory,
        });

        let mut outcomes = Vec::with_capacity(total);
        for (i, data) in self.source_lines.iter().enumerate() {
            let index = i + 1;
            let result = self.process_item(index, data);

            match &result {
                Ok(path) => on_event(BatchEvent::ItemSucceeded { index, total, data, path }),
                Err(error) => {
                    tracing::error!("batch item {} failed: {}", index, error);
                    on_event(BatchEvent::ItemFailed { index, total, data, error });
                }
            }

            outcomes.push(ItemOutcome {
                index,
                data: data.clone(),
                result,
            });
        }

        let failed_count = outcomes.iter().filter(|o| o.result.is_err()).count();
        let success_count = outcomes.len() - failed_count;
        on_event(BatchEvent::Finished {
            success_count,
            failed_count,
        });

        BatchResult {
            success_count,
            failed_count,
            output_directory: self.output_directory.clone(),
            outcomes,
        }
    }

    fn process_item(&self, index: usize, data: &str) -> Result<PathBuf> {
        let request = self.template.with_data(data);
        let path = self
            .output_directory
            .join(batch_item_filename(index, request.format));
        write_to(&request, &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::request::{LogoBacking, OutputFormat};
    use qrcode::EcLevel;

    fn template(format: OutputFormat) -> GenerationRequest {
        GenerationRequest {
            data: String::new(),
            format,
            pixel_width: 100,
            margin: 2,
            dark: Rgba::BLACK,
            light: Rgba::WHITE,
            ec_level: EcLevel::M,
            logo_path: None,
            logo_size_fraction: 0.2,
            logo_backing: LogoBacking::Square,
        }
    }

    fn batch_file(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("items.txt");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_blank_lines_skipped() {
        let lines = parse_batch_lines("a\n\nb\n   \nc\n");
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_lines_trimmed_and_crlf_handled() {
        let lines = parse_batch_lines("  https://a.example  \r\n\r\nb\r\n");
        assert_eq!(lines, vec!["https://a.example", "b"]);
    }

    #[test]
    fn test_batch_processes_non_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_export_dir(dir.path().join("exports"));
        let file = batch_file(dir.path(), "a\n\nb\n   \nc\n");

        let t = template(OutputFormat::Raster);
        let job = BatchJob::prepare(&file, None, t, &config, 42).unwrap();
        assert_eq!(job.output_directory, dir.path().join("exports/items_batch_42"));

        let result = job.run(|_| {});
        assert_eq!(result.success_count, 3);
        assert_eq!(result.failed_count, 0);
        assert!(result.is_success());
        for name in ["qr-001.png", "qr-002.png", "qr-003.png"] {
            assert!(result.output_directory.join(name).is_file(), "{name}");
        }
        assert!(!result.output_directory.join("qr-004.png").exists());
    }

    #[test]
    fn test_one_failure_does_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_export_dir(dir.path());
        let too_long = "x".repeat(3000);
        let file = batch_file(dir.path(), &format!("one\ntwo\n{too_long}\nfour\nfive\n"));

        let t = template(OutputFormat::Vector);
        let job = BatchJob::prepare(&file, None, t, &config, 7).unwrap();

        let mut events = Vec::new();
        let result = job.run(|e| {
            events.push(match e {
                BatchEvent::Started { .. } => "started".to_string(),
                BatchEvent::ItemSucceeded { index, .. } => format!("ok {index}"),
                BatchEvent::ItemFailed { index, .. } => format!("fail {index}"),
                BatchEvent::Finished { .. } => "finished".to_string(),
            })
        });

        assert_eq!(result.success_count, 4);
        assert_eq!(result.failed_count, 1);
        assert!(!result.is_success());
        assert_eq!(
            events,
            vec!["started", "ok 1", "ok 2", "fail 3", "ok 4", "ok 5", "finished"]
        );

        for i in [1, 2, 4, 5] {
            assert!(result.output_directory.join(format!("qr-00{i}.svg")).is_file());
        }
        assert!(!result.output_directory.join("qr-003.svg").exists());

        let failures: Vec<_> = result.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].index, 3);
        assert!(matches!(failures[0].result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_unwritable_item_is_counted() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_export_dir(dir.path());
        let file = batch_file(dir.path(), "a\nb\nc\nd\ne\n");

        let t = template(OutputFormat::Raster);
        let job = BatchJob::prepare(&file, None, t, &config, 9).unwrap();
        // a directory squatting on the second item's file name makes the write fail
        fs::create_dir(job.output_directory.join("qr-002.png")).unwrap();

        let result = job.run(|_| {});
        assert_eq!(result.success_count, 4);
        assert_eq!(result.failed_count, 1);
        assert!(matches!(result.outcomes[1].result, Err(Error::Io(_))));
    }

    #[test]
    fn test_missing_logo_fails_every_item_independently() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_export_dir(dir.path());
        let file = batch_file(dir.path(), "a\nb\n");
        let mut t = template(OutputFormat::Raster);
        t.logo_path = Some(dir.path().join("missing.png"));

        let job = BatchJob::prepare(&file, None, t, &config, 1).unwrap();
        let result = job.run(|_| {});
        assert_eq!(result.success_count, 0);
        assert_eq!(result.failed_count, 2);
    }

    #[test]
    fn test_empty_batch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_export_dir(dir.path());
        let file = batch_file(dir.path(), "\n  \n");
        let result = BatchJob::prepare(&file, None, template(OutputFormat::Raster), &config, 1);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_output_directory_option() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_export_dir(dir.path());
        let file = batch_file(dir.path(), "a\n");
        let target = dir.path().join("codes");

        let job = BatchJob::prepare(
            &file,
            Some(target.to_str().unwrap()),
            template(OutputFormat::Raster),
            &config,
            5,
        )
        .unwrap();
        assert_eq!(job.output_directory, target.join("items_batch_5"));
        assert!(job.output_directory.is_dir());
    }
}
