use std::path::Path;

use getcomments::{discover_go_files, Extractor, Input};
use serde_json::json;

use crate::output::{comment_rows, print_json, print_rows, OutputFormat};

pub fn run(dir: &Path, extractor: &Extractor, format: OutputFormat) -> Result<(), String> {
    let files = discover_go_files(dir).map_err(|e| e.to_string())?;
    let inputs: Vec<Input> = files.iter().cloned().map(Input::from).collect();
    let results = extractor.extract_all(&inputs);

    let mut extracted = Vec::new();
    let mut failures = Vec::new();
    for (path, result) in files.iter().zip(results) {
        let shown = path
            .strip_prefix(dir)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(path)
            .display()
            .to_string();
        match result {
            Ok(map) => extracted.push((shown, map)),
            Err(e) => {
                tracing::warn!(path = %shown, error = %e, "extraction failed");
                failures.push((shown, e.to_string()));
            }
        }
    }

    let anchors: usize = extracted.iter().map(|(_, m)| m.len()).sum();
    let comments: usize = extracted.iter().map(|(_, m)| m.comment_count()).sum();
    let stats = extractor.cache().stats();

    match format {
        OutputFormat::Json => {
            let report = json!({
                "files": extracted
                    .iter()
                    .map(|(path, map)| json!({ "path": path, "comments": map }))
                    .collect::<Vec<_>>(),
                "failures": failures
                    .iter()
                    .map(|(path, error)| json!({ "path": path, "error": error }))
                    .collect::<Vec<_>>(),
                "summary": {
                    "files": files.len(),
                    "anchors": anchors,
                    "comments": comments,
                    "failures": failures.len(),
                    "cache_hits": stats.hits,
                    "cache_misses": stats.misses,
                },
            });
            print_json(&report)?;
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<Vec<String>> = extracted
                .iter()
                .flat_map(|(path, map)| {
                    comment_rows(map, format).into_iter().map(move |mut row| {
                        row.insert(0, path.clone());
                        row
                    })
                })
                .collect();
            let columns = match format {
                OutputFormat::Csv => ["path", "key", "comment"],
                _ => ["path", "key", "comments"],
            };
            print_rows(&columns, &rows, format)?;

            for (path, error) in &failures {
                eprintln!("failed: {path}: {error}");
            }
            if format == OutputFormat::Table {
                println!(
                    "{} file(s), {anchors} anchor(s), {comments} comment(s), {} failure(s); cache {} hit(s), {} miss(es)",
                    files.len(),
                    failures.len(),
                    stats.hits,
                    stats.misses
                );
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} of {} file(s) failed to extract", failures.len(), files.len()))
    }
}
