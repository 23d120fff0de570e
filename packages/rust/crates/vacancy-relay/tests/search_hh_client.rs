#![allow(missing_docs)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use axum::extract::{Query as QueryParams, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{Json, Router, routing::get};
use vacancy_relay::{HhClient, HhClientConfig, VacancySearcher};
use vacancy_store::{Experience, Query};

#[derive(Clone, Default)]
struct SearchMockState {
    requests: Arc<Mutex<Vec<(HashMap<String, String>, Option<String>)>>>,
    fail: bool,
}

async fn handle_vacancies(
    State(state): State<SearchMockState>,
    headers: HeaderMap,
    QueryParams(params): QueryParams<HashMap<String, String>>,
) -> (StatusCode, Json<serde_json::Value>) {
    let user_agent = headers
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    state
        .requests
        .lock()
        .expect("requests lock")
        .push((params, user_agent));
    if state.fail {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"errors": [{"type": "bad_argument"}]})),
        );
    }
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "found": 2,
            "page": 0,
            "items": [
                {
                    "id": "9001",
                    "name": "Golang developer",
                    "experience": {"id": "between1And3", "name": "1–3 years"},
                    "salary": null
                },
                {"id": "9002", "name": "Backend engineer"}
            ]
        })),
    )
}

async fn spawn_search_mock(
    fail: bool,
) -> Result<Option<(String, SearchMockState, tokio::task::JoinHandle<()>)>> {
    let state = SearchMockState {
        fail,
        ..SearchMockState::default()
    };
    let app = Router::new()
        .route("/vacancies", get(handle_vacancies))
        .with_state(state.clone());
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("skipping hh client tests: local socket bind is not permitted");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(Some((format!("http://{addr}"), state, handle)))
}

fn client(api_base_url: String) -> HhClient {
    HhClient::new(&HhClientConfig {
        api_base_url,
        user_agent: "vacancy-relay-test/1.0".to_string(),
        period_days: 1,
        request_timeout: Duration::from_secs(5),
    })
}

#[tokio::test]
async fn search_sends_filters_and_decodes_items() -> Result<()> {
    let Some((api_base, state, handle)) = spawn_search_mock(false).await? else {
        return Ok(());
    };
    let query = Query::new(1, 96, "golang", Experience::Between1And3);

    let vacancies = client(api_base).search(&query, 1).await?;

    assert_eq!(vacancies.len(), 2);
    assert_eq!(vacancies[0].id, "9001");
    assert_eq!(vacancies[0].url(), "https://hh.ru/vacancy/9001");
    assert_eq!(
        vacancies[0].experience.as_ref().map(|e| e.id.as_str()),
        Some("between1And3")
    );
    assert!(vacancies[1].experience.is_none());

    let requests = state.requests.lock().expect("requests lock").clone();
    assert_eq!(requests.len(), 1);
    let (params, user_agent) = &requests[0];
    assert_eq!(params.get("area").map(String::as_str), Some("1"));
    assert_eq!(params.get("professional_role").map(String::as_str), Some("96"));
    assert_eq!(params.get("text").map(String::as_str), Some("golang"));
    assert_eq!(params.get("period").map(String::as_str), Some("1"));
    assert_eq!(params.get("experience").map(String::as_str), Some("between1And3"));
    assert_eq!(user_agent.as_deref(), Some("vacancy-relay-test/1.0"));

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn any_experience_sends_no_experience_filter() -> Result<()> {
    let Some((api_base, state, handle)) = spawn_search_mock(false).await? else {
        return Ok(());
    };
    let query = Query::new(2, 10, "golang-разработчик", Experience::Any);

    client(api_base).search(&query, 3).await?;

    let requests = state.requests.lock().expect("requests lock").clone();
    let (params, _) = &requests[0];
    assert!(!params.contains_key("experience"));
    assert_eq!(params.get("text").map(String::as_str), Some("golang-разработчик"));
    assert_eq!(params.get("period").map(String::as_str), Some("3"));

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn http_error_is_reported() -> Result<()> {
    let Some((api_base, _state, handle)) = spawn_search_mock(true).await? else {
        return Ok(());
    };
    let query = Query::new(1, 96, "golang", Experience::Any);

    let error = client(api_base)
        .search(&query, 1)
        .await
        .expect_err("400 should fail");
    assert!(error.to_string().contains("400"));

    handle.abort();
    Ok(())
}
