use super::*;

#[test]
fn timeout_millis_converts_and_clamps() {
    assert_eq!(timeout_millis(Duration::from_secs(15)), 15_000);
    assert_eq!(timeout_millis(Duration::from_secs(u64::MAX / 1000)), u32::MAX);
}

#[cfg(not(feature = "csr"))]
#[test]
fn server_render_transport_is_unavailable() {
    let request = HttpRequest {
        method: session::Method::Get,
        url: "http://127.0.0.1:5000/api/profile".to_owned(),
        bearer: None,
        body: None,
    };
    let result = futures::executor::block_on(BrowserTransport::default().execute(request));
    assert!(matches!(result, Err(TransportError::Unavailable(_))));
}
