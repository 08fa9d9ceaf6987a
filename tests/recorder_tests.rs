use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::net::TcpListener;
use url::Url;

use reckon::api::HistoryClient;
use reckon::db::{CalculationsStorage, NewCalculation};
use reckon::router::{ReckonState, reckon_router};
use reckon::service::recorder::{self, RecorderEvent};

async fn spawn_server(tag: &str) -> (Url, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "reckon-{}-{}-{}.sqlite",
        tag,
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let pool = reckon::db::connect(&database_url)
        .await
        .expect("failed to open test database");
    let storage = CalculationsStorage::new(pool);
    storage.init_schema().await.expect("failed to init schema");

    let app = reckon_router(ReckonState::new(storage));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server crashed");
    });

    let base = Url::parse(&format!("http://{addr}/")).expect("listener address is a valid URL");
    (base, temp_path)
}

#[tokio::test]
async fn recorded_calculation_lands_in_history() {
    let (base, temp_path) = spawn_server("recorder-ok").await;
    let client = HistoryClient::new(&base).expect("client");
    let recorder = recorder::spawn(client.clone()).await;
    let mut events = recorder.subscribe();

    recorder.record(NewCalculation {
        expression: "2+2".to_string(),
        result: "4".to_string(),
    });

    let settled = tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("recorder did not settle in time")
        .expect("recorder event channel closed");
    match settled {
        RecorderEvent::Recorded(created) => {
            assert!(created.id > 0);
            assert_eq!(created.expression, "2+2");
        }
        RecorderEvent::Failed(notice) => panic!("append failed: {notice}"),
    }

    let listed = client.list().await.expect("list failed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].result, "4");

    let _ = std::fs::remove_file(&temp_path);
}

#[tokio::test]
async fn unreachable_api_surfaces_failure_without_stopping_the_recorder() {
    // Discard port; nothing listens there.
    let base = Url::parse("http://127.0.0.1:9/").expect("valid URL");
    let client = HistoryClient::new(&base).expect("client");
    let recorder = recorder::spawn(client).await;
    let mut events = recorder.subscribe();

    recorder.record(NewCalculation {
        expression: "1+1".to_string(),
        result: "2".to_string(),
    });
    let first = tokio::time::timeout(Duration::from_secs(15), events.recv())
        .await
        .expect("recorder did not settle in time")
        .expect("recorder event channel closed");
    match first {
        RecorderEvent::Failed(notice) => assert!(notice.contains("1+1")),
        RecorderEvent::Recorded(created) => panic!("unexpected success: {created:?}"),
    }

    // The actor keeps accepting messages after a failure.
    recorder.record(NewCalculation {
        expression: "3+3".to_string(),
        result: "6".to_string(),
    });
    let second = tokio::time::timeout(Duration::from_secs(15), events.recv())
        .await
        .expect("recorder did not settle in time")
        .expect("recorder event channel closed");
    match second {
        RecorderEvent::Failed(notice) => assert!(notice.contains("3+3")),
        RecorderEvent::Recorded(created) => panic!("unexpected success: {created:?}"),
    }
}

#[tokio::test]
async fn clear_through_client_empties_history() {
    let (base, temp_path) = spawn_server("recorder-clear").await;
    let client = HistoryClient::new(&base).expect("client");

    client
        .create(&NewCalculation {
            expression: "9-3".to_string(),
            result: "6".to_string(),
        })
        .await
        .expect("create failed");
    assert_eq!(client.list().await.expect("list failed").len(), 1);

    client.clear().await.expect("clear failed");
    assert!(client.list().await.expect("list failed").is_empty());

    let _ = std::fs::remove_file(&temp_path);
}
