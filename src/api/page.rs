//! The upload form (self-contained, no external resources).
//!
//! Request lifecycle on the page: Idle → Processing → Success | Failed → Idle.
//! The submit button is disabled while a request is processing.

use axum::extract::State;
use axum::response::Html;

use crate::api::endpoints::summarize::{FILES_FIELD, MODEL_FIELD};
use crate::api::types::ApiContext;

/// File types the picker offers. Only PDF is extracted; images are rejected
/// by the extractor.
pub const ACCEPTED_FILE_TYPES: &str = ".pdf,.jpeg,.png";

pub async fn serve_form(State(ctx): State<ApiContext>) -> Html<String> {
    Html(render_form(&ctx.models))
}

pub fn render_form(models: &[String]) -> String {
    let options: String = models
        .iter()
        .map(|m| {
            let m = escape_html(m);
            format!(r#"<option value="{m}">{m}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("\n          ");

    FORM_TEMPLATE
        .replace("{{APP_NAME}}", crate::config::APP_NAME)
        .replace("{{MODEL_OPTIONS}}", &options)
        .replace("{{ACCEPT}}", ACCEPTED_FILE_TYPES)
        .replace("{{MODEL_FIELD}}", MODEL_FIELD)
        .replace("{{FILES_FIELD}}", FILES_FIELD)
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const FORM_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{APP_NAME}} - Medical Record Summary</title>
  <style>
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
      background: #fafaf9; color: #1c1917;
      display: flex; justify-content: center; padding: 32px 16px;
    }
    main { width: 100%; max-width: 960px; display: grid; gap: 24px; grid-template-columns: 1fr 1fr; }
    @media (max-width: 720px) { main { grid-template-columns: 1fr; } }
    h1 { grid-column: 1 / -1; font-size: 24px; }
    .panel { background: white; border: 1px solid #e7e5e4; border-radius: 12px; padding: 20px; }
    label { display: block; font-size: 14px; font-weight: 600; margin-bottom: 8px; }
    select, input[type=file] { width: 100%; margin-bottom: 20px; font-size: 14px; }
    select { padding: 10px; border: 1px solid #d6d3d1; border-radius: 8px; }
    .btn {
      width: 100%; padding: 14px; border: none; border-radius: 10px;
      background: #4a7c59; color: white; font-size: 16px; font-weight: 500; cursor: pointer;
    }
    .btn:disabled { opacity: 0.5; cursor: not-allowed; }
    textarea {
      width: 100%; min-height: 420px; padding: 12px; font-family: ui-monospace, monospace;
      font-size: 13px; border: 1px solid #d6d3d1; border-radius: 8px; resize: vertical;
    }
    .status { margin-top: 12px; font-size: 14px; color: #78716c; }
    .status.error { color: #dc2626; }
  </style>
</head>
<body>
  <main>
    <h1>{{APP_NAME}}</h1>

    <form class="panel" id="summary-form">
      <label for="model">Choose a Model</label>
      <select id="model" name="{{MODEL_FIELD}}">
          {{MODEL_OPTIONS}}
      </select>

      <label for="files">Input medical records</label>
      <input type="file" id="files" name="{{FILES_FIELD}}" accept="{{ACCEPT}}" multiple>

      <button class="btn" type="submit" id="submit">Submit</button>
      <div class="status" id="status"></div>
    </form>

    <section class="panel">
      <label for="output">Summary</label>
      <textarea id="output" readonly></textarea>
    </section>
  </main>

  <script>
    var form = document.getElementById('summary-form');
    var submit = document.getElementById('submit');
    var output = document.getElementById('output');
    var statusEl = document.getElementById('status');

    function showStatus(text, type) {
      statusEl.textContent = text;
      statusEl.className = 'status ' + (type || '');
    }

    form.addEventListener('submit', function(e) {
      e.preventDefault();
      submit.disabled = true;
      output.value = '';
      showStatus('Processing...', '');

      fetch('/api/summarize', { method: 'POST', body: new FormData(form) })
        .then(function(resp) {
          return resp.json()
            .then(function(body) { return { ok: resp.ok, body: body }; })
            .catch(function() {
              var msg = 'Request failed: ' + resp.status + ' ' + resp.statusText;
              return { ok: false, body: { error: { message: msg } } };
            });
        })
        .then(function(result) {
          if (result.ok) {
            output.value = result.body.report;
            showStatus('Done', '');
          } else {
            var msg = (result.body.error && result.body.error.message) || 'Request failed';
            showStatus(msg, 'error');
          }
        })
        .catch(function() {
          showStatus('Error: could not reach the server', 'error');
        })
        .finally(function() {
          submit.disabled = false;
        });
    });
  </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_contains_every_model_option() {
        let html = render_form(&["model-a".to_string(), "model-b".to_string()]);
        assert!(html.contains(r#"<option value="model-a">model-a</option>"#));
        assert!(html.contains(r#"<option value="model-b">model-b</option>"#));
    }

    #[test]
    fn form_field_names_match_handler() {
        let html = render_form(&["m".to_string()]);
        assert!(html.contains(r#"name="model""#));
        assert!(html.contains(r#"name="files""#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn non_json_reply_falls_back_to_status() {
        let html = render_form(&["m".to_string()]);
        let parse = html.find("resp.json()").unwrap();
        let fallback = html.find("'Request failed: ' + resp.status").unwrap();
        let network = html.find("could not reach the server").unwrap();
        assert!(parse < fallback);
        assert!(fallback < network);
    }

    #[test]
    fn model_names_are_escaped() {
        let html = render_form(&[r#"<script>"x"</script>"#.to_string()]);
        assert!(!html.contains("<script>\"x\""));
        assert!(html.contains("&lt;script&gt;&quot;x&quot;"));
    }
}
