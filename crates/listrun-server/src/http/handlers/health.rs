//! Health check and index page.

use axum::{http::header, response::IntoResponse, Json};

/// Health check endpoint.
///
/// GET /api/health
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "app": "listrun web interface",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Static control page.
///
/// GET /
pub async fn index() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>listrun</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 20px; background: #f5f5f5; }
        h1 { color: #333; }
        section { background: white; box-shadow: 0 1px 3px rgba(0,0,0,0.1); padding: 16px; margin-bottom: 16px; }
        label { display: block; margin: 8px 0 4px; color: #555; }
        input { width: 100%; max-width: 420px; padding: 6px; }
        button { margin-top: 12px; padding: 8px 16px; }
        pre { background: #111; color: #ddd; padding: 12px; max-height: 320px; overflow-y: auto; }
        .running { color: #eab308; font-weight: bold; }
        .idle { color: #22c55e; font-weight: bold; }
    </style>
</head>
<body>
    <h1>listrun</h1>
    <section>
        <h2>Create listing</h2>
        <label for="niche">Niche</label>
        <input id="niche" value="funny cat">
        <label for="keyword">Keyword</label>
        <input id="keyword" value="sarcastic cat with coffee">
        <label for="description">Description</label>
        <input id="description" value="Funny cat design for t-shirt">
        <button onclick="createListing()">Create 1 listing</button>
        <button onclick="analyzeNiche()">Analyze niche</button>
        <p id="message"></p>
    </section>
    <section>
        <h2>Status: <span id="state" class="idle">idle</span></h2>
        <pre id="logs"></pre>
    </section>
    <p style="color:#888;font-size:12px;">
        API: <a href="/status">/status</a> |
        <a href="/api/status">/api/status</a> |
        <a href="/api/output">/api/output</a> |
        <a href="/api/niche-suggestions">/api/niche-suggestions</a>
    </p>
    <script>
        function field(id) { return document.getElementById(id).value; }

        async function post(url, body) {
            const res = await fetch(url, {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(body),
            });
            const json = await res.json();
            document.getElementById('message').textContent = json.message || json.error || json.status;
            refresh();
        }

        function createListing() {
            post('/api/create-listings', {
                niche: field('niche'),
                keyword: field('keyword'),
                description: field('description'),
            });
        }

        function analyzeNiche() {
            post('/api/analyze-niche', { niche: field('niche') });
        }

        async function refresh() {
            const status = await (await fetch('/status')).json();
            const state = document.getElementById('state');
            state.textContent = status.running ? 'running ' + status.current_task : 'idle';
            state.className = status.running ? 'running' : 'idle';
            document.getElementById('logs').textContent = status.logs.join('\n');
        }

        refresh();
        setInterval(refresh, 2000);
    </script>
</body>
</html>"#;
