// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 端到端测试
//!
//! 在回环地址的临时端口上启动真实的服务循环，通过 TCP 客户端验证
//! 响应格式、指令语义以及顺序服务。

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use board_dashboard::{page, Snapshot};
use common::*;

const IO_TIMEOUT: Duration = Duration::from_secs(3);

fn split_response(response: &str) -> (&str, &str) {
    response
        .split_once("\r\n\r\n")
        .expect("response has no header terminator")
}

#[tokio::test]
async fn test_get_dashboard() {
    let (addr, device, handle) = start_server(FakeBoard::new(), IO_TIMEOUT).await;

    let response = send_request(addr, b"GET / HTTP/1.1\r\nHost: 192.168.4.1\r\n\r\n")
        .await
        .unwrap();
    let (header, body) = split_response(&response);

    assert_eq!(
        header,
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nConnection: close"
    );
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.ends_with("</html>"));
    assert!(body.contains("status-indicator status-off"));
    assert!(body.contains("1h 2m 5s"));
    assert!(body.contains("127.4&deg;F"));
    assert!(!pin_state(&device));

    handle.abort();
}

/// 响应体与直接渲染同一快照的结果逐字节一致
#[tokio::test]
async fn test_body_matches_renderer() {
    let (addr, _device, handle) = start_server(FakeBoard::new(), IO_TIMEOUT).await;

    let response = send_request(addr, b"GET /?led=on HTTP/1.1\r\n\r\n")
        .await
        .unwrap();
    let (_, body) = split_response(&response);

    let expected = page::render(&Snapshot {
        output_pin_on: true,
        touch_value: 412,
        adc_value: 1877,
        free_mem_kb: 98,
        total_mem_kb: 111,
        uptime_text: "1h 2m 5s".to_string(),
        temp_f: "127.4".to_string(),
        cpu_freq_mhz: "240".to_string(),
        ip_addr: "192.168.4.1".to_string(),
        mac_addr: "24:0a:c4:00:be:ef".to_string(),
    });
    assert_eq!(body.as_bytes(), &expected[..]);

    handle.abort();
}

#[tokio::test]
async fn test_toggle_on_then_off() {
    let board = FakeBoard::new();
    let pin = board.pin.clone();
    let (addr, device, handle) = start_server(board, IO_TIMEOUT).await;

    let response = send_request(addr, b"GET /?led=on HTTP/1.1\r\n\r\n")
        .await
        .unwrap();
    assert!(response.contains("status-indicator status-on"));
    assert!(response.contains(r#"id="ledToggle" checked>"#));
    assert!(pin_state(&device));
    assert!(pin.load(Ordering::SeqCst));

    let response = send_request(addr, b"GET /?led=off HTTP/1.1\r\n\r\n")
        .await
        .unwrap();
    assert!(response.contains("status-indicator status-off"));
    assert!(!pin_state(&device));
    assert!(!pin.load(Ordering::SeqCst));

    handle.abort();
}

/// 没有指令的请求不改变状态，也不驱动引脚
#[tokio::test]
async fn test_plain_request_is_noop() {
    let board = FakeBoard::new();
    let writes = board.writes.clone();
    let (addr, device, handle) = start_server(board, IO_TIMEOUT).await;
    let writes_at_start = writes.load(Ordering::SeqCst);

    send_request(addr, b"GET /?led=on HTTP/1.1\r\n\r\n")
        .await
        .unwrap();
    for _ in 0..3 {
        let response = send_request(addr, b"GET / HTTP/1.1\r\n\r\n").await.unwrap();
        assert!(response.contains("status-indicator status-on"));
    }
    assert!(pin_state(&device));
    assert_eq!(writes.load(Ordering::SeqCst), writes_at_start + 1);

    handle.abort();
}

#[tokio::test]
async fn test_both_directives_on_wins() {
    let (addr, device, handle) = start_server(FakeBoard::new(), IO_TIMEOUT).await;

    send_request(
        addr,
        b"GET /?led=off HTTP/1.1\r\nReferer: http://192.168.4.1/?led=on\r\n\r\n",
    )
    .await
    .unwrap();
    assert!(pin_state(&device));

    handle.abort();
}

#[tokio::test]
async fn test_temperature_placeholder_inline() {
    let mut board = FakeBoard::new();
    board.temperature = None;
    let (addr, _device, handle) = start_server(board, IO_TIMEOUT).await;

    let response = send_request(addr, b"GET / HTTP/1.1\r\n\r\n").await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("N/A&deg;F"));

    handle.abort();
}

/// 连续请求按 accept 顺序依次得到服务，每个响应都反映前一个请求留下的状态
#[tokio::test]
async fn test_sequential_requests_in_order() {
    let (addr, _device, handle) = start_server(FakeBoard::new(), IO_TIMEOUT).await;

    let script: [(&[u8], &str); 4] = [
        (b"GET /?led=on HTTP/1.1\r\n\r\n", "status-on"),
        (b"GET / HTTP/1.1\r\n\r\n", "status-on"),
        (b"GET /?led=off HTTP/1.1\r\n\r\n", "status-off"),
        (b"GET / HTTP/1.1\r\n\r\n", "status-off"),
    ];
    for (request, marker) in script {
        let response = send_request(addr, request).await.unwrap();
        assert!(response.contains(marker), "expected {}", marker);
    }

    handle.abort();
}
