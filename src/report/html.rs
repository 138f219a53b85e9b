use super::{NodeStatus, ReportField, ReportNode, WorkflowReport};
use itertools::Itertools;

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; color: #2c3e50; font-size: 11pt; line-height: 1.5; }
.page { padding: 30px 40px; }
.report-header { display: flex; justify-content: space-between; border-bottom: 3px solid #2c3e50; padding-bottom: 15px; margin-bottom: 25px; }
.report-title { font-size: 20pt; font-weight: 700; }
.report-subtitle { font-size: 11pt; color: #7f8c8d; }
.report-id { font-size: 9pt; color: #95a5a6; font-family: monospace; }
.section { margin-bottom: 22px; page-break-inside: avoid; }
.section-title { font-size: 13pt; font-weight: 700; border-bottom: 2px solid #3498db; padding-bottom: 5px; margin-bottom: 12px; }
.subsection-title { font-size: 11pt; font-weight: 600; color: #34495e; margin: 10px 0 6px 0; }
.data-table { width: 100%; border-collapse: collapse; margin: 10px 0; font-size: 10pt; }
.data-table th { background: #2c3e50; color: white; padding: 8px 12px; text-align: left; }
.data-table td { padding: 7px 12px; border-bottom: 1px solid #ecf0f1; }
.result-grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; }
.result-card { background: #f7f9fc; border: 1px solid #dce1e7; border-radius: 6px; padding: 12px; text-align: center; }
.result-card .label { font-size: 9pt; color: #7f8c8d; text-transform: uppercase; }
.result-card .value { font-size: 16pt; font-weight: 700; }
.badge { display: inline-block; padding: 3px 10px; border-radius: 12px; font-size: 9pt; font-weight: 600; margin-left: 10px; }
.badge-pass { background: #d5f5e3; color: #27ae60; }
.badge-fail { background: #fadbd8; color: #e74c3c; }
.badge-info { background: #d6eaf8; color: #2980b9; }
.step-list { padding-left: 24px; }
.connection-item { padding: 6px 12px; margin-bottom: 5px; background: #edf2f7; border-left: 3px solid #2c3e50; font-size: 10pt; }
.note-box { background: #fef9e7; border-left: 4px solid #f39c12; padding: 12px 15px; font-size: 10pt; }
"#;

/// Escapes text for inclusion in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
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

fn badge_class(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Completed => "badge-pass",
        NodeStatus::Error => "badge-fail",
        NodeStatus::Pending => "badge-info",
    }
}

fn field_rows(fields: &[ReportField], empty: &str) -> String {
    if fields.is_empty() {
        return format!("<tr><td colspan=\"2\">{}</td></tr>", empty);
    }
    fields
        .iter()
        .map(|f| {
            format!(
                "<tr><td>{}</td><td>{}</td></tr>",
                escape_html(&f.label),
                escape_html(&f.value)
            )
        })
        .join("")
}

fn node_section(index: usize, node: &ReportNode) -> String {
    let error = node
        .error
        .as_deref()
        .map(|e| format!("<div class=\"note-box\">{}</div>", escape_html(e)))
        .unwrap_or_default();
    format!(
        r#"<div class="section">
<div class="subsection-title">Node {}: {}<span class="badge {}">{}</span></div>
<p class="report-id">Type: {}</p>
{}
<table class="data-table"><thead><tr><th>Input Parameter</th><th>Value</th></tr></thead><tbody>{}</tbody></table>
<table class="data-table"><thead><tr><th>Output Result</th><th>Value</th></tr></thead><tbody>{}</tbody></table>
</div>"#,
        index + 1,
        escape_html(&node.name),
        badge_class(node.status),
        node.status.as_str(),
        escape_html(&node.node_type),
        error,
        field_rows(&node.inputs, "No inputs"),
        field_rows(&node.outputs, "Not calculated"),
    )
}

/// Renders a self-contained static HTML document for `report`.
pub fn render_html(report: &WorkflowReport) -> String {
    let order = if report.execution_order.is_empty() {
        "<p>No execution order determined.</p>".to_string()
    } else {
        format!(
            "<ol class=\"step-list\">{}</ol>",
            report
                .execution_order
                .iter()
                .map(|name| format!("<li>{}</li>", escape_html(name)))
                .join("")
        )
    };

    let nodes = report
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| node_section(i, n))
        .join("\n");

    let connections = if report.connections.is_empty() {
        "<p>No connections defined.</p>".to_string()
    } else {
        report
            .connections
            .iter()
            .map(|c| {
                format!(
                    "<div class=\"connection-item\">{} &rarr; {}</div>",
                    escape_html(&c.from),
                    escape_html(&c.to)
                )
            })
            .join("\n")
    };

    let notes = report
        .error
        .as_deref()
        .map(|e| {
            format!(
                "<div class=\"section\"><div class=\"section-title\">5. Notes</div><div class=\"note-box\">{}</div></div>",
                escape_html(e)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Workflow Execution Report</title>
<style>{style}</style>
</head>
<body>
<div class="page">
<div class="report-header">
<div>
<div class="report-title">Workflow Execution Report</div>
<div class="report-subtitle">{title}</div>
<div class="report-id">{id}</div>
</div>
<div class="report-id">{date}</div>
</div>
<div class="section">
<div class="section-title">1. Summary</div>
<div class="result-grid">
<div class="result-card"><div class="label">Total Nodes</div><div class="value">{total}</div></div>
<div class="result-card"><div class="label">Completed</div><div class="value">{completed}</div></div>
<div class="result-card"><div class="label">Errors</div><div class="value">{errors}</div></div>
<div class="result-card"><div class="label">Pending</div><div class="value">{pending}</div></div>
</div>
</div>
<div class="section">
<div class="section-title">2. Execution Order</div>
{order}
</div>
<div class="section">
<div class="section-title">3. Node Details</div>
{nodes}
</div>
<div class="section">
<div class="section-title">4. Data Flow Connections</div>
{connections}
</div>
{notes}
</div>
</body>
</html>
"#,
        style = STYLE,
        title = escape_html(&report.title),
        id = report.report_id(),
        date = report.generated_at.format("%B %-d, %Y %H:%M UTC"),
        total = report.nodes.len(),
        completed = report.count(NodeStatus::Completed),
        errors = report.count(NodeStatus::Error),
        pending = report.count(NodeStatus::Pending),
        order = order,
        nodes = nodes,
        connections = connections,
        notes = notes,
    )
}
