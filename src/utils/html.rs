use std::fmt::Write;

use crate::models::StatusRow;

const HEADER: &str = r#"<!DOCTYPE HTML>
<html>
<head>
<style>
table, th, td {
  border: 1px solid black;
  border-collapse: collapse;
  font-family:monospace,monospace;
  font-size:1em;
}
th {
  font-weight: bold;
  padding: 15px;
  text-align: left;
}
td {
  padding: 15px;
  text-align: left;
}
#Online {
  background-color: #228B22;
  color: white;
  font-weight: bold;
  text-transform: uppercase;
}
#Offline {
  background-color: #DC143C;
  color: white;
  font-weight: bold;
  text-transform: uppercase;
}
</style>
  <title>Status Page</title>
</head>
<body>
"#;

const FOOTER: &str = "</body>\n</html>";

pub fn render_dashboard(rows: &[StatusRow]) -> String {
    let mut page = String::from(HEADER);
    page.push_str("  <table>\n");
    page.push_str(
        "    <thead><tr><th>Device</th><th>Last Checkin</th><th>Seconds Since Checkin</th><th>State</th></tr></thead>\n",
    );
    page.push_str("    <tbody>\n");

    for row in rows {
        let state = row.liveness.state();
        // writing into a String cannot fail
        let _ = writeln!(
            page,
            "      <tr><td>{}</td><td>{}</td><td>{}</td><td id=\"{}\">{}</td></tr>",
            escape(row.device.as_str()),
            row.last_checkin_display(),
            row.seconds_since_display(),
            state,
            state
        );
    }

    page.push_str("    </tbody>\n");
    page.push_str("  </table>\n");
    page.push_str(FOOTER);
    page
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
