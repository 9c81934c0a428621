//! css-list-tasks end to end with a recording HTTP invoker

use blox_demo::commands::ListTasks;
use blox_demo::error::DemoError;

use crate::integration::{run_script, RecordingCloud, RecordingHttp, ScriptedPrompter};

#[test]
fn test_all_filters_are_forwarded() {
    let cloud = RecordingCloud::default();
    let http = RecordingHttp::responding(200, "[]");
    let mut prompter = ScriptedPrompter::default();

    let (result, out) = run_script(
        &ListTasks,
        &["--cluster", "c1", "--status", "running", "--started-by", "blox"],
        &cloud,
        &http,
        &mut prompter,
    );
    result.unwrap();

    let calls = http.calls.borrow();
    assert_eq!(calls[0].uri, "/v1/tasks");
    assert_eq!(
        calls[0].query,
        vec![
            ("cluster".to_string(), "c1".to_string()),
            ("status".to_string(), "running".to_string()),
            ("startedBy".to_string(), "blox".to_string()),
        ]
    );
    assert!(out.ends_with("HTTP Response Code: 200\n[]\n"));
}

#[test]
fn test_single_task_lookup() {
    let cloud = RecordingCloud::default();
    let http = RecordingHttp::responding(200, "{}");
    let mut prompter = ScriptedPrompter::default();

    let (result, _) = run_script(
        &ListTasks,
        &["--cluster=c1", "--task-arn=t1", "--status=ignored"],
        &cloud,
        &http,
        &mut prompter,
    );
    result.unwrap();
    assert_eq!(http.calls.borrow()[0].uri, "/v1/tasks/c1/t1");
    assert!(http.calls.borrow()[0].query.is_empty());
}

#[test]
fn test_error_status_is_reported_with_body() {
    let cloud = RecordingCloud::default();
    let http = RecordingHttp::failing(DemoError::HttpStatus {
        method: "GET".to_string(),
        url: "http://localhost:3000/v1/tasks".to_string(),
        status: 500,
        message: "HTTP status 500 Internal Server Error".to_string(),
        body: Some("db down".to_string()),
    });
    let mut prompter = ScriptedPrompter::default();

    let (result, _) = run_script(&ListTasks, &[], &cloud, &http, &mut prompter);
    let printed = blox_demo::cli::map_error(&result.unwrap_err());
    assert_eq!(
        printed,
        "Error: Invalid response on 'GET http://localhost:3000/v1/tasks' - \
         HTTP status 500 Internal Server Error\ndb down"
    );
}
