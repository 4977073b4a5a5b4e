use std::net::SocketAddr;

use exodus_import::{
    ConfigManager, ErrorKind, ExclusionList, ImportPipeline, RuleFileManager,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const REGISTRY: &str = r#"{
    "trackers": {
        "1": {"id": 1, "name": "AppsFlyer", "code_signature": "com.appsflyer.", "network_signature": "appsflyer\\.com", "website": "https://www.appsflyer.com/", "description": "", "creation_date": "2017-09-24"},
        "2": {"id": 2, "name": "Google AdMob", "code_signature": "com.google.android.gms.ads.|com.google.ads.", "network_signature": "", "website": "", "description": "", "creation_date": ""},
        "3": {"id": 3, "name": "Tapjoy", "code_signature": "com.tapjoy.", "network_signature": "", "website": "", "description": "Ads", "creation_date": ""},
        "4": {"id": 4, "name": "Vungle", "code_signature": "com.vungle.", "network_signature": "", "website": "", "description": "", "creation_date": ""}
    }
}"#;

const BASELINE: &str = r#"[
    {"id": 0, "name": "AppsFlyer", "company": "AppsFlyer", "searchKeyword": ["com.appsflyer"]},
    {"id": 1, "name": "Unfinished", "searchKeyword": []},
    {"id": 2, "name": "Local SDK", "searchKeyword": ["com.local.sdk"], "sideEffect": "None", "note": "curated"}
]"#;

/// 单次响应的本地 HTTP 服务
async fn serve_once(status_line: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let mut request = Vec::new();
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    addr
}

#[tokio::test]
async fn test_full_import_run() {
    let addr = serve_once("HTTP/1.1 200 OK", REGISTRY).await;
    let dir = tempfile::tempdir().unwrap();
    let baseline_path = dir.path().join("blocker-rules.json");
    let output_path = dir.path().join("general.json");
    tokio::fs::write(&baseline_path, BASELINE).await.unwrap();

    let config = ConfigManager::custom()
        .registry_url(format!("http://{}/api/trackers", addr))
        .baseline_path(&baseline_path)
        .output_path(&output_path)
        .http_timeout(5)
        .build();
    let summary = ImportPipeline::new(config).run().await.unwrap();

    assert_eq!(summary.remote_trackers, 4);
    assert_eq!(summary.baseline_rules, 3);
    assert_eq!(summary.stats.replaced, 1);
    assert_eq!(summary.stats.kept, 1);
    assert_eq!(summary.stats.dropped, 1);
    assert_eq!(summary.stats.supplemental, 1);

    let written = tokio::fs::read_to_string(&output_path).await.unwrap();
    let rules = RuleFileManager::parse_baseline(&written).unwrap();
    let names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();
    // Google AdMob 在默认排除名单中，补充阶段取到 Tapjoy
    assert_eq!(names, vec!["AppsFlyer", "Local SDK", "Tapjoy"]);
    assert_eq!(rules.iter().map(|r| r.id).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(rules[0].search_keyword, vec!["com.appsflyer."]);
    assert!(rules[0].company.is_none());
    assert_eq!(rules[1].side_effect.as_deref(), Some("None"));
    assert_eq!(rules[1].extra["note"], "curated");
    assert_eq!(rules[2].description.as_deref(), Some("Ads"));
}

#[tokio::test]
async fn test_server_error_is_transport_failure() {
    let addr = serve_once("HTTP/1.1 503 Service Unavailable", "").await;
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("general.json");

    let config = ConfigManager::custom()
        .registry_url(format!("http://{}/api/trackers", addr))
        .baseline_path(dir.path().join("blocker-rules.json"))
        .output_path(&output_path)
        .build();
    let err = ImportPipeline::new(config).run().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_missing_baseline_aborts_before_writing() {
    let addr = serve_once("HTTP/1.1 200 OK", REGISTRY).await;
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("general.json");

    let config = ConfigManager::custom()
        .registry_url(format!("http://{}/api/trackers", addr))
        .baseline_path(dir.path().join("absent.json"))
        .output_path(&output_path)
        .excluded_names(ExclusionList::empty())
        .build();
    let err = ImportPipeline::new(config).run().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!output_path.exists());
}

#[test]
fn test_output_feeds_back_as_baseline() {
    let pipeline = ImportPipeline::new(ConfigManager::get_default());
    let trackers = exodus_import::RegistryLoader::parse_registry(REGISTRY.as_bytes()).unwrap();
    let baseline = RuleFileManager::parse_baseline(BASELINE).unwrap();

    let (first, _) = pipeline.merge(&baseline, &trackers);
    let rendered = RuleFileManager::render_output(&first).unwrap();
    let reloaded = RuleFileManager::parse_baseline(&rendered).unwrap();
    assert_eq!(reloaded, first);

    // 第二轮：Tapjoy 已在基线中，补充阶段取下一个 Vungle
    let (second, summary) = pipeline.merge(&reloaded, &trackers);
    assert_eq!(summary.stats.supplemental, 1);
    assert_eq!(second.last().map(|r| r.name.as_str()), Some("Vungle"));
}
