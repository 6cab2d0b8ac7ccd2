//! Human-readable rendering of session results.

use textwrap::Options;

use crate::indexer::IndexReport;
use crate::model::{ReleaseStats, Trie};
use crate::query::{Extremum, GeneOccurrences};

/// Welcome banner shown when the console starts.
pub fn banner() -> String {
    [
        "=========================================",
        "               DNA Analyzer              ",
        "      Type 'bio exit' to quit.           ",
        "=========================================",
    ]
    .join("\n")
}

pub fn help_text() -> String {
    [
        "Commands:",
        "  bio start <m>      build the tree for genes of length m",
        "  bio read <file>    index every gene of a sequence file",
        "  bio search <gene>  offsets where a gene starts",
        "  bio all            every gene found, in alphabetical order",
        "  bio max            the most frequent gene(s)",
        "  bio min            the least frequent gene(s)",
        "  bio exit           quit",
    ]
    .join("\n")
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn join_offsets(positions: &[usize]) -> String {
    positions
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn started(trie: &Trie) -> String {
    format!(
        "-> Tree created with depth {} ({} possible genes).",
        trie.depth(),
        trie.leaf_count()
    )
}

/// Summary line for one indexed record.
pub fn indexed(id: &str, report: &IndexReport) -> String {
    let mut line = format!(
        "-> '{}': {} read, {} indexed",
        id,
        plural(report.length, "base"),
        plural(report.inserted, "gene")
    );
    if !report.skipped.is_empty() {
        line.push_str(&format!(
            ", {} skipped (invalid symbols)",
            plural(report.skipped.len(), "window")
        ));
    }
    line.push('.');
    line
}

/// `GENE: n occurrences at p1, p2, ...`, wrapped at `width`.
pub fn occurrences(gene: &str, positions: &[usize], width: usize) -> String {
    let text = format!(
        "{}: {} at {}",
        gene,
        plural(positions.len(), "occurrence"),
        join_offsets(positions)
    );
    textwrap::fill(&text, Options::new(width).subsequent_indent("    "))
}

pub fn all_genes(hits: &[GeneOccurrences<'_>], width: usize) -> String {
    let mut lines = vec![format!("-> {} found:", plural(hits.len(), "gene"))];
    lines.extend(hits.iter().map(|g| occurrences(&g.gene, g.positions, width)));
    lines.join("\n")
}

pub fn extremum(result: &Extremum<'_>, width: usize) -> String {
    let mut lines = vec![format!(
        "-> {} frequent: {} with {}:",
        capitalize(&result.kind.to_string()),
        plural(result.genes.len(), "gene"),
        plural(result.count, "occurrence")
    )];
    lines.extend(
        result
            .genes
            .iter()
            .map(|g| occurrences(&g.gene, g.positions, width)),
    );
    lines.join("\n")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn released(stats: &ReleaseStats) -> String {
    format!(
        "-> Released {} and {}.",
        plural(stats.nodes, "node"),
        plural(stats.positions, "offset")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::SkippedWindow;
    use crate::query::ExtremumKind;

    #[test]
    fn test_occurrences_line() {
        assert_eq!(occurrences("AC", &[0, 4], 80), "AC: 2 occurrences at 0, 4");
        assert_eq!(occurrences("TA", &[3], 80), "TA: 1 occurrence at 3");
    }

    #[test]
    fn test_occurrences_wraps_long_lists() {
        let positions: Vec<usize> = (0..100).collect();
        let text = occurrences("ACGT", &positions, 30);
        assert!(text.lines().count() > 1);
        assert!(text.lines().all(|l| l.len() <= 30));
        assert!(text.lines().skip(1).all(|l| l.starts_with("    ")));
    }

    #[test]
    fn test_indexed_summary() {
        let report = IndexReport {
            length: 5,
            windows: 4,
            inserted: 2,
            skipped: vec![
                SkippedWindow { offset: 1, symbol: 'N' },
                SkippedWindow { offset: 2, symbol: 'N' },
            ],
        };
        assert_eq!(
            indexed("seq", &report),
            "-> 'seq': 5 bases read, 2 genes indexed, 2 windows skipped (invalid symbols)."
        );
    }

    #[test]
    fn test_extremum_header() {
        let result = Extremum {
            kind: ExtremumKind::Min,
            count: 1,
            genes: vec![GeneOccurrences {
                gene: "TA".into(),
                positions: &[3],
            }],
        };
        assert_eq!(
            extremum(&result, 80),
            "-> Least frequent: 1 gene with 1 occurrence:\nTA: 1 occurrence at 3"
        );
    }

    #[test]
    fn test_released() {
        let stats = ReleaseStats { nodes: 21, positions: 1 };
        assert_eq!(released(&stats), "-> Released 21 nodes and 1 offset.");
    }
}
