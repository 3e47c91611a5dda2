use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use serde::Deserialize;

use getcomments::CommentsMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Print a JSON value, indented.
pub fn print_json(value: &impl serde::Serialize) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| format!("Invalid JSON: {e}"))?;
    println!("{text}");
    Ok(())
}

/// Print tabular data in the requested format.
pub fn print_rows(columns: &[&str], rows: &[Vec<String>], format: OutputFormat) -> Result<(), String> {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_header(columns);
            for row in rows {
                table.add_row(row);
            }
            println!("{table}");
        }
        OutputFormat::Json => {
            let json_rows: Vec<serde_json::Value> = rows
                .iter()
                .map(|row| {
                    let mut map = serde_json::Map::new();
                    for (i, col) in columns.iter().enumerate() {
                        map.insert(
                            col.to_string(),
                            serde_json::Value::String(row.get(i).cloned().unwrap_or_default()),
                        );
                    }
                    serde_json::Value::Object(map)
                })
                .collect();
            print_json(&json_rows)?;
        }
        OutputFormat::Csv => {
            println!("{}", columns.join(","));
            for row in rows {
                let fields: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
                println!("{}", fields.join(","));
            }
        }
    }
    Ok(())
}

/// Rows for a comments map: one per key for tables, one per comment for CSV.
pub fn comment_rows(map: &CommentsMap, format: OutputFormat) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for (line, comments) in map.iter() {
        let key = map.key(line);
        match format {
            OutputFormat::Csv => {
                rows.extend(comments.iter().map(|c| vec![key.clone(), c.clone()]));
            }
            OutputFormat::Table | OutputFormat::Json => rows.push(vec![key, comments.join("\n")]),
        }
    }
    rows
}

/// Print extraction results. JSON prints the map itself, or an array of maps
/// when there is more than one.
pub fn print_maps(maps: &[CommentsMap], format: OutputFormat) -> Result<(), String> {
    match format {
        OutputFormat::Json => match maps {
            [single] => print_json(single),
            _ => print_json(&maps),
        },
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<Vec<String>> = maps
                .iter()
                .flat_map(|map| comment_rows(map, format))
                .collect();
            let columns = match format {
                OutputFormat::Csv => ["key", "comment"],
                _ => ["key", "comments"],
            };
            print_rows(&columns, &rows, format)
        }
    }
}

/// Quote a CSV field when it holds a separator, quote or line break.
pub fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("// plain"), "// plain");
        assert_eq!(csv_field("// a, b"), "\"// a, b\"");
        assert_eq!(csv_field("/* say \"hi\" */"), "\"/* say \"\"hi\"\" */\"");
        assert_eq!(csv_field("/*\nx\n*/"), "\"/*\nx\n*/\"");
    }

    #[test]
    fn test_comment_rows() {
        let map = getcomments::extract_source(
            "package main\n\n// one\n// two\nfunc F() {}\n",
            "a.go",
            &getcomments::ExtractOptions::default(),
        )
        .unwrap();

        let table = comment_rows(&map, OutputFormat::Table);
        assert_eq!(table, vec![vec!["a.go:5".to_string(), "// one\n// two".to_string()]]);

        let csv = comment_rows(&map, OutputFormat::Csv);
        assert_eq!(csv.len(), 2);
        assert_eq!(csv[1], vec!["a.go:5".to_string(), "// two".to_string()]);
    }

    #[test]
    fn test_format_from_config_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: OutputFormat,
        }
        let w: Wrapper = toml::from_str("format = \"csv\"").unwrap();
        assert_eq!(w.format, OutputFormat::Csv);
    }
}
