use crate::markup::{html_escape, Node};

const STYLES: &str = r#"
body { font-family: sans-serif; margin: 0; }
.site-query-panel { margin: 8px; padding: 16px; }
.site-query-panel .error { color: #b00020; }
.site-query-panel .loading { font-style: italic; }
.results { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 16px; margin-top: 16px; }
.content-card { display: flex; flex-direction: column; align-items: center; gap: 20px; padding: 20px; border: 2px solid black; background-color: var(--site-hex-code, lightgray); }
.content-card .title { font-size: 18px; font-weight: bold; text-align: center; }
.content-card img { height: 150px; }
.content-card .info-row { display: flex; flex-direction: column; }
.content-card .label { font-weight: bold; }
"#;

/// Standalone HTML page around `body`.
pub fn render_document(title: &str, body: &Node) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n<title>{title}</title>\n<style>{STYLES}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = html_escape(title),
        body = body.to_html(),
    )
}
