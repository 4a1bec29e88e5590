//! Drives a controller through its channels the way the console does.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use courier_application::ports::{HttpClient, HttpClientError, TransportResponse};
use courier_domain::OutboundRequest;
use courier_ui::console::{ConsoleAction, parse_line, render};
use courier_ui::{Controller, ControllerHandle, UiUpdate};
use tokio::time::timeout;

/// Fails every request with a 404 carrying a JSON body.
struct NotFoundClient;

#[async_trait]
impl HttpClient for NotFoundClient {
    async fn execute(
        &self,
        _request: OutboundRequest,
    ) -> Result<TransportResponse, HttpClientError> {
        Ok(TransportResponse {
            status: 404,
            status_text: "Not Found".to_string(),
            headers: BTreeMap::from([(
                "content-type".to_string(),
                "application/json".to_string(),
            )]),
            body: br#"{"message":"missing"}"#.to_vec(),
        })
    }
}

fn feed(handle: &ControllerHandle, lines: &[&str]) {
    for line in lines {
        match parse_line(line).unwrap() {
            ConsoleAction::Command(command) => handle.commands.send(command).unwrap(),
            other => panic!("'{line}' is not a controller command: {other:?}"),
        }
    }
}

/// Collects rendered updates until one matches `done`.
async fn rendered_until(
    handle: &mut ControllerHandle,
    done: impl Fn(&UiUpdate) -> bool,
) -> Vec<String> {
    let mut out = Vec::new();
    loop {
        let update = timeout(Duration::from_secs(5), handle.updates.recv())
            .await
            .expect("update in time")
            .expect("controller alive");
        out.push(render(&update));
        if done(&update) {
            return out;
        }
    }
}

#[tokio::test]
async fn test_console_session_against_controller() {
    let mut handle = Controller::spawn(Arc::new(NotFoundClient));

    feed(
        &handle,
        &[
            "new",
            "method delete",
            "url https://api.example.com/items/7",
            "token abc",
            "send",
        ],
    );

    let out = rendered_until(&mut handle, |u| matches!(u, UiUpdate::ResponseReady { .. })).await;

    assert!(out.contains(&"Active tab: 2".to_string()));
    assert!(out.contains(&"[2] method updated".to_string()));
    assert!(out.contains(&"[2] DELETE https://api.example.com/items/7 ...".to_string()));
    let response = out.last().unwrap();
    assert!(response.starts_with("[2] error: Request failed with status code 404 ("));
    assert!(response.contains("\"message\": \"missing\""));

    feed(&handle, &["select 1", "show"]);
    let out = rendered_until(&mut handle, |u| matches!(u, UiUpdate::TabDetails(_))).await;
    assert!(out.last().unwrap().ends_with("No response yet"));

    feed(&handle, &["close 2", "tabs"]);
    let out = rendered_until(&mut handle, |u| {
        matches!(u, UiUpdate::TabsUpdated(tabs) if tabs.len() == 1)
    })
    .await;
    assert_eq!(out.last().unwrap(), "Tabs:\n * [1] GET New Request");

    let ControllerHandle { commands, task, .. } = handle;
    drop(commands);
    timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
}
