//! The OAuth relay page served at `/connect/{provider}/callback`.
//!
//! Providers redirect the consent popup here. The page forwards whatever
//! parameters came back (success or `error=...`) to the dashboard window
//! that opened the popup via `postMessage`, then closes itself. The
//! target origin is pinned to the configured dashboard origin, so the
//! authorization code cannot leak to a window on another origin.

use adops_core::error::CoreError;
use adops_core::provider::Provider;
use axum::extract::{Path, State};
use axum::response::Html;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const RELAY_PAGE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>Connecting...</title>
<style>
  body { font-family: system-ui, sans-serif; text-align: center; padding-top: 4rem; color: #444; }
</style>
</head>
<body>
<p id="notice">Completing connection...</p>
<script>
(function () {
  "use strict";
  var params = {};
  var collect = function (raw) {
    if (!raw) return;
    raw.split("&").forEach(function (pair) {
      if (!pair) return;
      var eq = pair.indexOf("=");
      var key = eq < 0 ? pair : pair.slice(0, eq);
      var value = eq < 0 ? "" : pair.slice(eq + 1);
      params[decodeURIComponent(key)] = decodeURIComponent(value.replace(/\+/g, " "));
    });
  };
  // Providers return the result in the query string; some append a fragment.
  collect(window.location.search.replace(/^\?/, ""));
  collect(window.location.hash.replace(/^#/, ""));

  if (window.opener) {
    window.opener.postMessage(
      { type: "adops:oauth", provider: "{{PROVIDER}}", params: params },
      "{{TARGET_ORIGIN}}"
    );
    window.close();
  } else {
    document.getElementById("notice").textContent =
      "This window was opened outside the dashboard. Close it and retry from the Integrations page.";
  }
})();
</script>
</body>
</html>
"#;

/// GET /connect/{provider}/callback (root level, not under `/api/v1`)
pub async fn relay(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let provider = Provider::from_slug(&slug).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!("Unknown provider: {slug}")))
    })?;

    let page = RELAY_PAGE
        .replace("{{PROVIDER}}", provider.as_str())
        .replace("{{TARGET_ORIGIN}}", &state.config.dashboard_origin);

    Ok(Html(page))
}
