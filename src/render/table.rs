//! Table reconstruction from spacing heuristics.
//!
//! HWP paragraph text carries no cell structure once table controls are
//! stripped, but cells usually survive as tab stops or as columns padded
//! with spaces. A line containing a tab or two consecutive spaces is
//! treated as a table row, and every maximal run of such lines becomes one
//! table. Prose with an accidental double space is misread as a one-row
//! table; that false positive is accepted.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Block, Table};

fn space_run() -> &'static Regex {
    static SPACE_RUN: OnceLock<Regex> = OnceLock::new();
    SPACE_RUN.get_or_init(|| Regex::new(r" {2,}").expect("valid regex"))
}

/// Whether a line looks like a table row.
pub fn is_tabular(line: &str) -> bool {
    line.contains('\t') || space_run().is_match(line)
}

/// Split a tabular line into trimmed cells.
///
/// Tabs take precedence: when a line has at least one tab it is split on
/// tabs only and space runs stay inside the cells.
pub fn split_cells(line: &str) -> Vec<String> {
    if line.contains('\t') {
        line.split('\t').map(|c| c.trim().to_string()).collect()
    } else {
        space_run()
            .split(line)
            .map(|c| c.trim().to_string())
            .collect()
    }
}

/// Group lines into output blocks.
///
/// Maximal runs of tabular lines become [`Block::Table`] padded to the
/// widest row; all other lines are kept verbatim as [`Block::Line`].
pub fn reconstruct<S: AsRef<str>>(lines: &[S]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut run: Vec<Vec<String>> = Vec::new();

    for line in lines {
        let line = line.as_ref();
        if is_tabular(line) {
            run.push(split_cells(line));
        } else {
            flush_run(&mut run, &mut blocks);
            blocks.push(Block::Line(line.to_string()));
        }
    }
    flush_run(&mut run, &mut blocks);

    blocks
}

fn flush_run(run: &mut Vec<Vec<String>>, blocks: &mut Vec<Block>) {
    if !run.is_empty() {
        blocks.push(Block::Table(Table::from_ragged(std::mem::take(run))));
    }
}
