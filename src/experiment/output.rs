// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ExperimentError;
use crate::model::Triple;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Render `triples` under a header. A `limit` of zero or less shows
/// everything; otherwise only the first `limit` triples are listed.
pub fn format_triples(label: &str, triples: &[Triple], limit: i64) -> String {
    let shown = match usize::try_from(limit) {
        Ok(limit) if limit > 0 => limit.min(triples.len()),
        _ => triples.len(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "=== {} (count={}) ===", label, triples.len());
    for triple in &triples[..shown] {
        let _ = writeln!(out, "{}", triple);
    }
    if shown < triples.len() {
        let _ = writeln!(out, "... ({} more)", triples.len() - shown);
    }
    out
}

pub fn print_triples(label: &str, triples: &[Triple], limit: i64) {
    println!();
    print!("{}", format_triples(label, triples, limit));
}

/// Write one `subject<TAB>predicate<TAB>"object"` line per triple, with the
/// object JSON-quoted.
pub fn save_triples<P: AsRef<Path>>(path: P, triples: &[Triple]) -> Result<(), ExperimentError> {
    let path = path.as_ref();
    write_triples(path, triples).map_err(|source| ExperimentError::Output {
        path: path.display().to_string(),
        source,
    })
}

fn write_triples(path: &Path, triples: &[Triple]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for triple in triples {
        let object = serde_json::to_string(triple.object()).map_err(io::Error::from)?;
        writeln!(writer, "{}\t{}\t{}", triple.subject(), triple.predicate(), object)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize) -> Vec<Triple> {
        (0..n)
            .map(|i| Triple::new(format!("s{i}"), "p", format!("o{i}")))
            .collect()
    }

    #[test]
    fn test_format_with_limit() {
        let text = format_triples("Centralized output", &sample(5), 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "=== Centralized output (count=5) ===");
        assert_eq!(lines[1], "s0 p o0");
        assert_eq!(lines[2], "s1 p o1");
        assert_eq!(lines[3], "... (3 more)");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_format_non_positive_limit_shows_all() {
        for limit in [0, -3] {
            let text = format_triples("out", &sample(3), limit);
            assert_eq!(text.lines().count(), 4);
            assert!(!text.contains("more)"));
        }
    }

    #[test]
    fn test_format_limit_larger_than_input() {
        let text = format_triples("out", &sample(2), 50);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_save_quotes_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let triples = vec![
            Triple::new("s", "p", "TrafficJam"),
            Triple::new("s", "p", "say \"hi\"\tnow"),
        ];

        save_triples(&path, &triples).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "s\tp\t\"TrafficJam\"");
        assert_eq!(lines[1], "s\tp\t\"say \\\"hi\\\"\\tnow\"");
    }

    #[test]
    fn test_save_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.tsv");
        let err = save_triples(&path, &sample(1)).unwrap_err();
        assert!(matches!(err, ExperimentError::Output { .. }));
        assert!(err.to_string().contains("out.tsv"));
    }
}
