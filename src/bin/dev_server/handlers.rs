use super::*;

fn detail(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "detail": msg.into() }))).into_response()
}

/// Resolves the caller's email from a `Bearer dev-token-for-<email>` header.
fn authenticate(headers: &HeaderMap) -> Result<String, Response> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Err(detail(StatusCode::UNAUTHORIZED, "Authorization header required"));
    };
    let value = value.to_str().unwrap_or("");
    let mut parts = value.split_whitespace();
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(detail(StatusCode::UNAUTHORIZED, "Invalid auth header"));
    };
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(detail(StatusCode::UNAUTHORIZED, "Invalid auth header"));
    }
    match token.strip_prefix(DEV_TOKEN_PREFIX) {
        Some(email) if !email.is_empty() => Ok(email.to_string()),
        _ => Err(detail(StatusCode::UNAUTHORIZED, "Unsupported token")),
    }
}

pub(super) async fn health() -> Json<Value> {
    Json(serde_json::json!({ "ok": true }))
}

pub(super) async fn login(Json(payload): Json<Value>) -> Response {
    let Some(email) = payload.get("email").and_then(Value::as_str).filter(|e| !e.is_empty()) else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "email required");
    };
    let domain_ok = email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'));
    if !domain_ok {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "invalid email");
    }
    tracing::info!(email, "issued dev token");
    Json(serde_json::json!({
        "access_token": format!("{}{}", DEV_TOKEN_PREFIX, email),
        "token_type": "bearer",
    }))
    .into_response()
}

pub(super) async fn user_groups(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let email = match authenticate(&headers) {
        Ok(email) => email,
        Err(resp) => return resp,
    };
    Json(serde_json::json!({
        "email": email,
        "memberOf": state.groups,
    }))
    .into_response()
}

pub(super) async fn create_bucket(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authenticate(&headers) {
        return resp;
    }
    let field = |k: &str| sanitize(body.get(k).and_then(Value::as_str));

    let Some(name) = field("name") else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "send 'name' (bucket name)");
    };
    let compartment = field("child")
        .or_else(|| field("group").and_then(|g| compartment_from_label(&g)));
    let Some(compartment) = compartment else {
        return detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            "send 'child' (compartment) or 'group' (label)",
        );
    };

    let mut buckets = state.buckets.write().await;
    if buckets.contains_key(&name) {
        return detail(StatusCode::CONFLICT, format!("bucket '{}' already exists", name));
    }
    buckets.insert(name.clone(), compartment.clone());
    tracing::info!(bucket = %name, %compartment, "created bucket");

    Json(serde_json::json!({
        "created": true,
        "bucket": name,
        "compartment": compartment,
    }))
    .into_response()
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct ListQuery {
    #[serde(default)]
    child: Option<String>,
    #[serde(default)]
    group: Option<String>,
}

pub(super) async fn list_buckets(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(q): Query<ListQuery>,
) -> Response {
    if let Err(resp) = authenticate(&headers) {
        return resp;
    }
    let compartment = sanitize(q.child.as_deref()).or_else(|| {
        sanitize(q.group.as_deref()).and_then(|g| compartment_from_label(&g))
    });

    let buckets = state.buckets.read().await;
    let listed: Vec<Value> = buckets
        .iter()
        .filter(|(_, c)| compartment.as_ref().is_none_or(|want| want == *c))
        .map(|(name, c)| serde_json::json!({ "name": name, "compartment": c }))
        .collect();
    Json(serde_json::json!({ "buckets": listed })).into_response()
}

pub(super) async fn delete_bucket(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Response {
    if let Err(resp) = authenticate(&headers) {
        return resp;
    }
    let mut buckets = state.buckets.write().await;
    if buckets.remove(&name).is_none() {
        return detail(StatusCode::NOT_FOUND, format!("bucket '{}' not found", name));
    }
    tracing::info!(bucket = %name, "deleted bucket");
    Json(serde_json::json!({ "deleted": true, "bucket": name })).into_response()
}
