//! cURL export

use courier_domain::OutboundRequest;

/// Renders the request exactly as the HTTP client would send it.
///
/// The method is always explicit because every request, GET included,
/// carries a JSON body and `-d` alone would make curl switch to POST.
#[must_use]
pub fn generate_curl(request: &OutboundRequest) -> String {
    let mut parts = vec!["curl".to_string()];

    parts.push(format!("-X {}", request.method));

    for (name, value) in &request.headers {
        parts.push(format!("-H {}", quote(&format!("{name}: {value}"))));
    }

    if request.header("content-type").is_none() {
        parts.push("-H 'Content-Type: application/json'".to_string());
    }

    parts.push(format!("-d {}", quote(&request.body.to_string())));

    parts.push(quote(&request.url));

    parts.join(" \\\n  ")
}

/// Single-quotes for POSIX shells.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
