//! Output rendering: tables, JSON, YAML, CSV and BIND-style zone export.

use std::io::Write;

use clap::ValueEnum;
use namecheap_api::{DnsRecord, RecordType};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
    Csv,
}

/// Print one result set in the requested format.
///
/// Table and CSV render from `headers` + `rows`; JSON and YAML serialize
/// `value` directly so structured consumers get real types instead of
/// pre-formatted strings.
pub fn print<T: Serialize>(
    format: OutputFormat,
    headers: &[&str],
    rows: &[Vec<String>],
    value: &T,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_table(headers, rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
        OutputFormat::Csv => print!("{}", render_csv(headers, rows)),
    }
    Ok(())
}

/// Plain fixed-width table; column widths come from the widest cell.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let render_row = |cells: &[String], out: &mut String| {
        let line = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{cell:<width$}", width = widths.get(i).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };

    let header_cells: Vec<String> = headers.iter().map(ToString::to_string).collect();
    render_row(&header_cells, &mut out);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    render_row(&rule, &mut out);
    for row in rows {
        render_row(row, &mut out);
    }
    out.pop();
    out
}

fn render_csv(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str(
        &headers
            .iter()
            .map(|h| csv_escape(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    out.push('\n');
    for row in rows {
        out.push_str(
            &row.iter()
                .map(|c| csv_escape(c))
                .collect::<Vec<_>>()
                .join(","),
        );
        out.push('\n');
    }
    out
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render records as a BIND-style zone listing, sorted by (type, name).
/// MX lines carry the priority between type and value.
pub fn bind_zone(domain: &str, records: &[DnsRecord], exported_at: &str) -> String {
    let mut sorted: Vec<&DnsRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        (a.record_type.as_str(), a.name.as_str()).cmp(&(b.record_type.as_str(), b.name.as_str()))
    });

    let mut lines = vec![
        format!("; Zone file for {domain}"),
        format!("; Exported at {exported_at}"),
        String::new(),
    ];
    for record in sorted {
        let line = if record.record_type == RecordType::Mx {
            format!(
                "{}\t{}\tIN\t{}\t{}\t{}",
                record.name,
                record.ttl,
                record.record_type,
                record.priority.unwrap_or(10),
                record.value
            )
        } else {
            format!(
                "{}\t{}\tIN\t{}\t{}",
                record.name, record.ttl, record.record_type, record.value
            )
        };
        lines.push(line);
    }
    lines.join("\n")
}

/// Ask a yes/no question on stderr; anything but y/yes declines.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use namecheap_api::RecordBuilder;

    #[test]
    fn table_pads_columns_to_widest_cell() {
        let table = render_table(
            &["NAME", "TTL"],
            &[
                vec!["www".to_string(), "300".to_string()],
                vec!["a-much-longer-name".to_string(), "60".to_string()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].starts_with("------------------"));
        assert!(lines[3].starts_with("a-much-longer-name  60"));
    }

    #[test]
    fn csv_escapes_embedded_delimiters() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn bind_zone_sorts_by_type_then_name() {
        let records = RecordBuilder::new()
            .txt("@", "v=spf1 -all", None)
            .a("www", "192.0.2.1", Some(300))
            .a("api", "192.0.2.2", Some(300))
            .mx("@", "mail.example.com.", Some(10), None)
            .build();
        let zone = bind_zone("example.com", &records, "2026-08-29");
        let lines: Vec<&str> = zone.lines().collect();
        assert_eq!(lines[0], "; Zone file for example.com");
        assert_eq!(lines[3], "api\t300\tIN\tA\t192.0.2.2");
        assert_eq!(lines[4], "www\t300\tIN\tA\t192.0.2.1");
        assert_eq!(lines[5], "@\t1799\tIN\tMX\t10\tmail.example.com.");
        assert_eq!(lines[6], "@\t1799\tIN\tTXT\tv=spf1 -all");
    }
}
