// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! 集成测试共用的假板卡、脚本化流与服务器启动工具。

#![allow(dead_code)]

use std::{
    io,
    net::{Ipv4Addr, SocketAddr},
    pin::Pin,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    task::{Context, Poll},
    time::Duration,
};

use board_dashboard::{Board, Config, Device, Exception, HeapStats, Server, SharedDevice};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf},
    net::TcpStream,
    task::JoinHandle,
};

/// 可观察、可注入故障的假板卡
#[derive(Clone)]
pub struct FakeBoard {
    pub pin: Arc<AtomicBool>,
    pub writes: Arc<AtomicUsize>,
    /// 置位后下一次触摸读取会 panic
    pub panic_next: Arc<AtomicBool>,
    pub temperature: Option<f32>,
    pub heap: HeapStats,
    pub uptime: Duration,
}

impl FakeBoard {
    pub fn new() -> Self {
        Self {
            pin: Arc::new(AtomicBool::new(false)),
            writes: Arc::new(AtomicUsize::new(0)),
            panic_next: Arc::new(AtomicBool::new(false)),
            temperature: Some(127.4),
            heap: HeapStats {
                free: 98 * 1024,
                alloc: 13 * 1024,
            },
            uptime: Duration::from_secs(3725),
        }
    }
}

impl Board for FakeBoard {
    fn write_output(&mut self, on: bool) {
        self.pin.store(on, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    fn read_touch(&mut self) -> u32 {
        if self.panic_next.swap(false, Ordering::SeqCst) {
            panic!("touch peripheral fault");
        }
        412
    }

    fn read_adc(&mut self) -> u16 {
        1877
    }

    fn heap(&mut self) -> HeapStats {
        self.heap
    }

    fn uptime(&self) -> Duration {
        self.uptime
    }

    fn temperature_f(&mut self) -> Result<f32, Exception> {
        self.temperature.ok_or(Exception::TemperatureUnavailable)
    }

    fn cpu_freq_hz(&self) -> u64 {
        240_000_000
    }

    fn ip_addr(&self) -> Ipv4Addr {
        Ipv4Addr::new(192, 168, 4, 1)
    }

    fn mac_addr(&self) -> [u8; 6] {
        [0x24, 0x0a, 0xc4, 0x00, 0xbe, 0xef]
    }
}

pub fn test_config(io_timeout: Duration) -> Config {
    Config::new()
        .with_port(0)
        .with_local(true)
        .with_io_timeout(io_timeout)
}

pub fn shared_device(board: FakeBoard) -> SharedDevice<FakeBoard> {
    Arc::new(Mutex::new(Device::new(board)))
}

/// 在回环地址的临时端口上启动服务循环
pub async fn start_server(
    board: FakeBoard,
    io_timeout: Duration,
) -> (SocketAddr, SharedDevice<FakeBoard>, JoinHandle<()>) {
    let server = Server::bind(test_config(io_timeout)).expect("bind failed");
    let addr = server.local_addr().expect("no local addr");
    let device = shared_device(board);
    let handle = tokio::spawn(server.serve(Arc::clone(&device)));
    (addr, device, handle)
}

/// 发送原始请求并读取至连接关闭
pub async fn send_request(addr: SocketAddr, request: &[u8]) -> io::Result<String> {
    let mut stream = TcpStream::connect(addr).await?;
    stream.write_all(request).await?;
    let mut buffer = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut buffer))
        .await
        .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "response timed out"))??;
    Ok(String::from_utf8_lossy(&buffer).to_string())
}

pub fn pin_state(device: &SharedDevice<FakeBoard>) -> bool {
    match device.lock() {
        Ok(d) => d.state().output_pin_on(),
        Err(poisoned) => poisoned.into_inner().state().output_pin_on(),
    }
}

/// 脚本化的内存流：读出预置的请求，写入时可限制单次字节数并在达到上限后报错
pub struct ScriptedStream {
    input: Vec<u8>,
    read_pos: usize,
    chunk: usize,
    write_limit: usize,
    pub written: Arc<Mutex<Vec<u8>>>,
    pub shut_down: Arc<AtomicBool>,
}

impl ScriptedStream {
    pub fn new(input: &[u8]) -> Self {
        Self {
            input: input.to_vec(),
            read_pos: 0,
            chunk: usize::MAX,
            write_limit: usize::MAX,
            written: Arc::new(Mutex::new(Vec::new())),
            shut_down: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 每次 poll_write 最多接受 `chunk` 字节
    pub fn with_chunk(mut self, chunk: usize) -> Self {
        self.chunk = chunk;
        self
    }

    /// 累计写入 `limit` 字节后模拟对端断开
    pub fn with_write_limit(mut self, limit: usize) -> Self {
        self.write_limit = limit;
        self
    }

    pub fn written_text(&self) -> String {
        String::from_utf8_lossy(&self.written.lock().unwrap()).to_string()
    }
}

impl AsyncRead for ScriptedStream {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let remaining = &this.input[this.read_pos..];
        let n = remaining.len().min(buf.remaining());
        buf.put_slice(&remaining[..n]);
        this.read_pos += n;
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for ScriptedStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        let mut written = this.written.lock().unwrap();
        if written.len() >= this.write_limit {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "peer went away",
            )));
        }
        let n = buf
            .len()
            .min(this.chunk)
            .min(this.write_limit - written.len());
        written.extend_from_slice(&buf[..n]);
        Poll::Ready(Ok(n))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.shut_down.store(true, Ordering::SeqCst);
        Poll::Ready(Ok(()))
    }
}
