use crate::models::ScanReport;

/// Renders the combined report page. Pure function of the report data; a run
/// with zero violations still gets the summary, just no tables.
pub fn render_report(report: &ScanReport) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<title>Scan Report</title>\n");
    out.push_str("<style>\n");
    out.push_str("table { border-collapse: collapse; width: 100%; }\n");
    out.push_str("th, td { border: 1px solid #dddddd; text-align: left; padding: 8px; }\n");
    out.push_str("th { background-color: #f2f2f2; }\n");
    out.push_str("</style>\n");
    out.push_str("</head>\n<body>\n");

    out.push_str("<h1>Scan Report</h1>\n");
    out.push_str(&format!("<p>Application Name: {}</p>\n", escape_html(&report.app_name)));
    out.push_str(&format!("<p>Application Version: {}</p>\n", escape_html(&report.app_version)));
    out.push_str(&format!("<p>Scan Date: {}</p>\n", escape_html(&report.timestamp)));

    out.push_str("<h2>Summary</h2>\n");
    out.push_str(&format!("<p>Total DevMan Violations: {}</p>\n", report.devman.len()));
    out.push_str(&format!("<p>Total CTC Violations: {}</p>\n", report.ctc.len()));
    out.push_str(&format!("<p>Total Dockerfile Violations: {}</p>\n", report.docker.len()));

    push_table(
        &mut out,
        "DevMan Violations",
        report
            .devman
            .iter()
            .map(|v| (v.file.as_str(), Some(v.line_number), v.description())),
    );
    push_table(
        &mut out,
        "CTC Violations",
        report
            .ctc
            .iter()
            .map(|v| (v.file.as_str(), v.line_number, v.description())),
    );
    push_table(
        &mut out,
        "Dockerfile Violations",
        report
            .docker
            .iter()
            .map(|v| (v.file.as_str(), Some(v.line_number), v.description())),
    );

    out.push_str("</body>\n</html>\n");
    out
}

/// Emits nothing for an empty category.
fn push_table<'a, I>(out: &mut String, title: &str, rows: I)
where
    I: Iterator<Item = (&'a str, Option<usize>, &'a str)>,
{
    let mut body = String::new();
    for (file, line, violation) in rows {
        body.push_str("<tr>");
        body.push_str(&format!("<td>{}</td>", escape_html(file)));
        body.push_str(&format!(
            "<td>{}</td>",
            line.map(|l| l.to_string()).unwrap_or_else(|| "-".to_string())
        ));
        body.push_str(&format!("<td>{}</td>", escape_html(violation)));
        body.push_str("</tr>\n");
    }
    if body.is_empty() {
        return;
    }

    out.push_str(&format!("<h2>{}</h2>\n", escape_html(title)));
    out.push_str("<table>\n");
    out.push_str("<thead><tr><th>File</th><th>Line Number</th><th>Violation</th></tr></thead>\n");
    out.push_str("<tbody>\n");
    out.push_str(&body);
    out.push_str("</tbody></table>\n");
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
