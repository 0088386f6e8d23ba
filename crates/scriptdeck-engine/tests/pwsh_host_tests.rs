// Integration tests against a real PowerShell host. Skipped (not failed)
// when no `pwsh` executable is on the PATH, so the suite stays green on
// machines without PowerShell installed.

use scriptdeck_core::errors::SessionError;
use scriptdeck_engine::host::PwshHost;
use scriptdeck_engine::{InvocationRequest, Session};
use serde_json::json;

fn pwsh_session() -> Option<Session> {
    match PwshHost::spawn() {
        Ok(host) => Some(Session::open(Box::new(host)).unwrap()),
        Err(_) => {
            eprintln!("pwsh not available; skipping PowerShell host test");
            None
        }
    }
}

const DEFINITIONS: &str = r#"
function Get-Greeting {
    param([string]$Name)
    [ordered]@{ Greeting = "Hello, $Name" }
}

function Get-Letters {
    @('a', 'b', 'c')
}
"#;

#[tokio::test]
async fn test_load_and_invoke_against_real_host() {
    let Some(session) = pwsh_session() else { return };

    session.load_definitions(DEFINITIONS).await.unwrap();

    let raw = session
        .invoke(
            InvocationRequest::new("Get-Greeting")
                .unwrap()
                .with_parameter("Name", "World"),
        )
        .await
        .unwrap();

    assert_eq!(raw.len(), 1);
    assert_eq!(raw.records()[0]["Greeting"], json!("Hello, World"));

    session.close();
}

#[tokio::test]
async fn test_scalar_collection_comes_back_as_records() {
    let Some(session) = pwsh_session() else { return };

    session.load_definitions(DEFINITIONS).await.unwrap();

    let raw = session
        .invoke(InvocationRequest::new("Get-Letters").unwrap())
        .await
        .unwrap();

    assert_eq!(raw.len(), 3);
    assert_eq!(raw.records()[0], json!("a"));

    session.close();
}

#[tokio::test]
async fn test_unknown_function_surfaces_host_diagnostics() {
    let Some(session) = pwsh_session() else { return };

    session.load_definitions(DEFINITIONS).await.unwrap();

    let err = session
        .invoke(InvocationRequest::new("Get-Nonexistent").unwrap())
        .await
        .unwrap_err();

    let SessionError::InvocationError {
        function_name,
        diagnostics,
    } = err
    else {
        panic!("expected InvocationError");
    };
    assert_eq!(function_name, "Get-Nonexistent");
    assert!(!diagnostics.is_empty());

    session.close();
}
