use crate::document::Document;
use crate::error::Error;
use crate::table::{Pass, SubstitutionPlan};
use log::debug;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Default, Clone, Copy)]
pub struct BatchOptions {
    /// Report every pattern that matched nothing in a document.
    pub strict: bool,
    /// Convert in memory only.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unmatched {
    pub document: PathBuf,
    pub pass: Pass,
    pub pattern: String,
}

/// Process status when strict mode found patterns that matched nothing.
pub const EXIT_UNMATCHED: i32 = 2;

#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<PathBuf>,
    pub replacements: usize,
    pub unmatched: Vec<Unmatched>,
}

impl BatchReport {
    pub fn exit_code(&self) -> i32 {
        if self.unmatched.is_empty() {
            0
        } else {
            EXIT_UNMATCHED
        }
    }
}

/// Converts each document in order, writing one confirmation line per
/// document and a summary line to `out`.
///
/// The first failure stops the run. Documents saved before the failure keep
/// their converted content.
pub fn run_batch<W: Write>(
    documents: &[PathBuf],
    plan: &SubstitutionPlan,
    options: BatchOptions,
    out: &mut W,
) -> Result<BatchReport, Error> {
    let mut report = BatchReport::default();

    for path in documents {
        let mut doc = Document::load(path)?;
        let conversion = doc.convert(plan);
        debug!(
            "{path:?}: pre={:?} main={:?}",
            conversion.pre_counts, conversion.main_counts
        );

        if options.dry_run {
            writeln!(out, "would convert {}", doc.path().display())?;
        } else {
            doc.save()?;
            writeln!(out, "converted {}", doc.path().display())?;
        }

        if options.strict {
            for (pass, pattern) in plan.unmatched(&conversion) {
                writeln!(
                    out,
                    "unmatched {} pattern {pattern:?} in {}",
                    pass.as_str(),
                    doc.path().display()
                )?;
                report.unmatched.push(Unmatched {
                    document: path.clone(),
                    pass,
                    pattern: pattern.to_string(),
                });
            }
        }

        report.replacements += conversion.total_replacements();
        report.converted.push(path.clone());
    }

    let verb = if options.dry_run {
        "would convert"
    } else {
        "converted"
    };
    writeln!(
        out,
        "{verb} {} ({})",
        plural(report.converted.len(), "document"),
        plural(report.replacements, "replacement")
    )?;
    Ok(report)
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
