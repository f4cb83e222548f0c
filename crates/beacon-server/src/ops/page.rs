//! Landing page template.

pub struct IndexView {
    pub hostname: String,
    pub timestamp: String,
    pub environment: String,
    pub runtime_version: String,
    pub version: String,
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

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 40px; background: #f5f5f5; }
        .container { max-width: 800px; margin: 0 auto; background: white; padding: 30px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { color: #2c3e50; border-bottom: 2px solid #3498db; padding-bottom: 20px; margin-bottom: 30px; }
        .info { background: #ecf0f1; padding: 15px; border-radius: 5px; margin: 10px 0; }
        .success { color: #27ae60; font-weight: bold; }
        .links { margin-top: 30px; }
        .links a { display: inline-block; margin: 10px 15px 10px 0; padding: 10px 20px; background: #3498db; color: white; text-decoration: none; border-radius: 5px; }
        .links a:hover { background: #2980b9; }
"#;

pub fn render_index(view: &IndexView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Beacon</title>
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Beacon</h1>
            <p class="success">Service is up</p>
        </div>

        <div class="info">
            <h3>Deployment Information</h3>
            <p><strong>Hostname:</strong> {hostname}</p>
            <p><strong>Timestamp:</strong> {timestamp}</p>
            <p><strong>Environment:</strong> {environment}</p>
            <p><strong>Version:</strong> {version}</p>
            <p><strong>Runtime:</strong> rustc {runtime}</p>
        </div>

        <div class="links">
            <a href="/health">Health Check</a>
            <a href="/info">System Info</a>
            <a href="/metrics">Metrics</a>
        </div>
    </div>
</body>
</html>
"#,
        style = STYLE,
        hostname = escape_html(&view.hostname),
        timestamp = escape_html(&view.timestamp),
        environment = escape_html(&view.environment),
        version = escape_html(&view.version),
        runtime = escape_html(&view.runtime_version),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_escapes_injected_values() {
        let html = render_index(&IndexView {
            hostname: "web-1".into(),
            timestamp: "2026-01-01T00:00:00.000Z".into(),
            environment: "<script>x</script>".into(),
            runtime_version: "1.80.0".into(),
            version: "1.0.0".into(),
        });
        assert!(html.contains("<strong>Hostname:</strong> web-1"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"<a href="/metrics">"#));
    }
}
