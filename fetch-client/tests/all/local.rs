use std::io::{ErrorKind, Write};

use fetch_client::{load_proxy_list, ClientError, DataClient};

fn client() -> DataClient {
    DataClient::new(Vec::<String>::new()).unwrap()
}

#[tokio::test]
async fn local_file_is_read_as_text() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "line one\nline two\n").unwrap();

    let contents = client().local_file(file.path()).await.unwrap();

    assert_eq!(contents, "line one\nline two\n");
}

#[tokio::test]
async fn missing_local_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    let err = client().local_file(&missing).await.unwrap_err();

    match err {
        ClientError::LocalFile { path, source } => {
            assert_eq!(path, missing);
            assert_eq!(source.kind(), ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_utf8_local_file_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0xff, 0xfe, 0x00, 0x61]).unwrap();

    let err = client().local_file(file.path()).await.unwrap_err();

    assert!(
        matches!(&err, ClientError::LocalFile { source, .. } if source.kind() == ErrorKind::InvalidData),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn proxy_list_is_loaded_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "# office proxies\nhttp://10.0.0.1:3128\n\nhttp://10.0.0.2:3128\n"
    )
    .unwrap();

    let proxies = load_proxy_list(file.path()).await.unwrap();
    assert_eq!(proxies, ["http://10.0.0.1:3128", "http://10.0.0.2:3128"]);

    let client = DataClient::new(proxies.clone()).unwrap();
    let selected = client.selected_proxy().unwrap();
    assert!(proxies.iter().any(|p| p == selected));
}

#[tokio::test]
async fn missing_proxy_list_is_reported() {
    let dir = tempfile::tempdir().unwrap();

    let err = load_proxy_list(dir.path().join("proxy.txt"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::ProxyList { .. }));
    assert!(err.to_string().starts_with("cannot read proxy list"));
}
