// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Exception 模块
//!
//! 该模块定义了仪表板服务在启动与请求处理生命周期中可能出现的各类异常情况。
//!
//! ## 分类
//! - **启动期致命错误**：配置不可读、端口绑定失败。只有绑定失败会终止进程。
//! - **单连接瞬时错误**：accept、读、写、超时、关闭失败以及处理任务异常终止。
//!   这些错误在连接处理器边界被记录并吞掉，永远不会打断主循环。
//! - **外设读取错误**：温度探头不可用。在读取点被替换为占位值，不会传播到客户端。

use std::{fmt, io};

/// 服务运行过程中发生的异常类型。
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Exception {
    /// 配置文件无法打开或读取。
    ConfigUnreadable,
    /// 监听端口绑定或 listen 失败。启动期致命错误。
    BindFailed(io::ErrorKind),
    /// accept 调用失败。
    AcceptFailed(io::ErrorKind),
    /// 读取请求时发生 I/O 错误。
    ReadFailed(io::ErrorKind),
    /// 读取请求超过期限。
    ReadTimeout,
    /// 发送响应时发生 I/O 错误（包括对端中途断开）。
    WriteFailed(io::ErrorKind),
    /// 发送响应超过期限。
    WriteTimeout,
    /// 关闭连接失败。
    CloseFailed(io::ErrorKind),
    /// 片上温度探头不受支持或读取失败。
    TemperatureUnavailable,
    /// 连接处理任务 panic 或被取消。
    HandlerAborted,
}

use Exception::*;

impl Exception {
    /// 是否为仅影响单个连接、可以继续服务的错误
    pub fn is_transient(&self) -> bool {
        !matches!(self, ConfigUnreadable | BindFailed(_))
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigUnreadable => write!(f, "Config file can't be read"),
            BindFailed(kind) => write!(f, "Couldn't bind listening socket: {}", kind),
            AcceptFailed(kind) => write!(f, "Accept failed: {}", kind),
            ReadFailed(kind) => write!(f, "Read failed: {}", kind),
            ReadTimeout => write!(f, "Read deadline exceeded"),
            WriteFailed(kind) => write!(f, "Write failed: {}", kind),
            WriteTimeout => write!(f, "Write deadline exceeded"),
            CloseFailed(kind) => write!(f, "Close failed: {}", kind),
            TemperatureUnavailable => write!(f, "Temperature probe unavailable"),
            HandlerAborted => write!(f, "Connection handler aborted"),
        }
    }
}
