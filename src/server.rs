// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 仪表板 Web 服务
//!
//! 该模块实现了单监听套接字上的顺序服务循环：
//! - 一次只处理一个连接，处理完毕（读、改、采、渲染、写、关）后才 accept 下一个。
//! - 每次读写都受连接期限约束，超时即视为失败。
//! - 任何单连接错误（包括处理任务 panic）都在连接处理器边界被记录并吞掉，
//!   主循环只根据结果决定日志，从不因此退出。

use std::{
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use log::{debug, error, info, warn};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    net::{TcpListener, TcpSocket},
    time::timeout,
};

use crate::{
    board::Board,
    config::Config,
    control::Device,
    exception::Exception,
    page,
    request::{Directive, Request},
    response::Response,
};

/// 被所有连接共享的设备。锁覆盖"应用指令 → 采集快照"整个区间。
pub type SharedDevice<B> = Arc<Mutex<Device<B>>>;

pub struct Server {
    listener: TcpListener,
    config: Arc<Config>,
}

impl Server {
    /// 绑定监听套接字（启用地址复用，固定 backlog）。
    ///
    /// 需要在 tokio 运行时内调用。失败属于启动期致命错误。
    pub fn bind(config: Config) -> Result<Self, Exception> {
        let address = match config.local() {
            true => Ipv4Addr::LOCALHOST,
            false => Ipv4Addr::UNSPECIFIED,
        };
        let socket_addr = SocketAddr::V4(SocketAddrV4::new(address, config.port()));
        debug!("服务端将在{}上监听Socket连接", socket_addr);

        let bind_failed = |e: std::io::Error| {
            error!("无法绑定{}：{}", socket_addr, e);
            Exception::BindFailed(e.kind())
        };
        let socket = TcpSocket::new_v4().map_err(bind_failed)?;
        socket.set_reuseaddr(true).map_err(bind_failed)?;
        socket.bind(socket_addr).map_err(bind_failed)?;
        let listener = socket.listen(config.backlog()).map_err(bind_failed)?;

        info!(
            "端口{}绑定完成，backlog {}",
            config.port(),
            config.backlog()
        );
        Ok(Self {
            listener,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Exception> {
        self.listener
            .local_addr()
            .map_err(|e| Exception::BindFailed(e.kind()))
    }

    /// 顺序 accept 循环，永不返回。
    ///
    /// 每个连接交给一个独立的任务处理，并在 accept 下一个连接之前等待其结束，
    /// 这样处理器中的 panic 只会终止该任务本身。
    pub async fn serve<B: Board + 'static>(self, device: SharedDevice<B>) {
        let mut id: u128 = 0;
        loop {
            let (stream, addr) = match self.listener.accept().await {
                Ok(pair) => pair,
                Err(e) => {
                    error!("[ID{}]{}", id, Exception::AcceptFailed(e.kind()));
                    continue;
                }
            };
            debug!("[ID{}]新的连接：{}", id, addr);

            let task = tokio::spawn(serve_connection(
                stream,
                id,
                Arc::clone(&device),
                Arc::clone(&self.config),
            ));
            if let Err(e) = task.await {
                error!("[ID{}]{}：{}", id, Exception::HandlerAborted, e);
            }
            id += 1;
        }
    }
}

/// 连接处理器边界：处理请求，记录失败，最后无条件关闭连接
pub async fn serve_connection<S, B>(
    mut stream: S,
    id: u128,
    device: SharedDevice<B>,
    config: Arc<Config>,
) where
    S: AsyncRead + AsyncWrite + Unpin,
    B: Board,
{
    if let Err(e) = handle_connection(&mut stream, id, &device, &config).await {
        warn!("[ID{}]连接处理失败：{}", id, e);
    }
    close(&mut stream, id, config.io_timeout()).await;
}

/// 单个连接的完整生命周期（不含关闭）。
///
/// 读一次，至多读取缓冲区上限；不完整的报文照常处理。
pub async fn handle_connection<S, B>(
    stream: &mut S,
    id: u128,
    device: &Mutex<Device<B>>,
    config: &Config,
) -> Result<(), Exception>
where
    S: AsyncRead + AsyncWrite + Unpin,
    B: Board,
{
    let deadline = config.io_timeout();
    let mut buffer = vec![0u8; config.buffer_size()];

    let n = match timeout(deadline, stream.read(&mut buffer)).await {
        Ok(Ok(n)) => n,
        Ok(Err(e)) => return Err(Exception::ReadFailed(e.kind())),
        Err(_) => return Err(Exception::ReadTimeout),
    };
    let start_time = Instant::now();
    let request = Request::from_bytes(&buffer[..n], config.buffer_size());
    if request.is_empty() {
        debug!("[ID{}]客户端未发送任何数据", id);
    } else {
        debug!("[ID{}]收到{}字节请求", id, request.len());
    }

    let (directive, snapshot) = {
        let mut guard = lock_device(device, id);
        guard.serve(&request)
    };
    if let Ok(json) = serde_json::to_string(&snapshot) {
        debug!("[ID{}]快照：{}", id, json);
    }

    let response = Response::from_html(page::render(&snapshot));
    let response_bytes = response.as_bytes();
    debug!("[ID{}]发送全量响应，长度: {}", id, response_bytes.len());
    write_all(stream, &response_bytes, deadline).await?;

    info!(
        "[ID{}] {}, {}, LED {}, {}ms",
        id,
        request.request_line(),
        match directive {
            Some(Directive::On) => "on",
            Some(Directive::Off) => "off",
            None => "-",
        },
        if snapshot.output_pin_on { "ON" } else { "OFF" },
        start_time.elapsed().as_millis()
    );
    Ok(())
}

/// 写出全部字节（部分写入会被重试），整体受期限约束
async fn write_all<S>(stream: &mut S, bytes: &[u8], deadline: Duration) -> Result<(), Exception>
where
    S: AsyncWrite + Unpin,
{
    let write = async {
        stream.write_all(bytes).await?;
        stream.flush().await
    };
    match timeout(deadline, write).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(Exception::WriteFailed(e.kind())),
        Err(_) => Err(Exception::WriteTimeout),
    }
}

/// 尽力关闭连接，失败只记录
async fn close<S>(stream: &mut S, id: u128, deadline: Duration)
where
    S: AsyncWrite + Unpin,
{
    match timeout(deadline, stream.shutdown()).await {
        Ok(Ok(())) => debug!("[ID{}]连接已关闭", id),
        Ok(Err(e)) => debug!("[ID{}]{}", id, Exception::CloseFailed(e.kind())),
        Err(_) => debug!("[ID{}]关闭连接超时，直接丢弃", id),
    }
}

fn lock_device<B: Board>(device: &Mutex<Device<B>>, id: u128) -> MutexGuard<'_, Device<B>> {
    match device.lock() {
        Ok(lock) => lock,
        Err(poisoned) => {
            warn!("[ID{}]设备锁被污染，恢复并继续", id);
            poisoned.into_inner()
        }
    }
}
