// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 仪表板协议参数与常量模块
//!
//! 该模块集中定义了仪表板服务遵循的协议常量和出厂默认值，包括：
//! - HTTP 报文换行符与响应头字段。
//! - 控制指令在请求报文中的字节标记。
//! - 监听端口、backlog、I/O 期限、读取缓冲区等运行参数的默认值。
//! - 默认的 GPIO 引脚分配与接入点参数。

/// 服务器名称标识，用于启动日志
pub const SERVER_NAME: &str = "board-dashboard";

/// HTTP 协议规定的换行符（Carriage Return Line Feed）
pub const CRLF: &str = "\r\n";

/// 仪表板页面的内容类型
pub const CONTENT_TYPE_HTML: &str = "text/html";

/// 打开输出引脚的指令标记
pub const DIRECTIVE_ON: &str = "/?led=on";

/// 关闭输出引脚的指令标记
pub const DIRECTIVE_OFF: &str = "/?led=off";

/// 温度探头不可用时的占位值
pub const PLACEHOLDER: &str = "N/A";

/// ADC 满量程读数（12 位）
pub const ADC_MAX: u16 = 4095;

pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_BACKLOG: u32 = 5;
/// 单次读写的期限（毫秒）
pub const DEFAULT_IO_TIMEOUT_MS: u64 = 3000;
/// 单次读取的缓冲区上限（字节）
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

pub const DEFAULT_SSID: &str = "ESP32-Dashboard";
pub const DEFAULT_PASSWORD: &str = "12345678";
pub const DEFAULT_AP_IP: &str = "192.168.4.1";
/// WPA2 口令的最短长度
pub const MIN_PASSWORD_LEN: usize = 8;

pub const DEFAULT_OUTPUT_PIN: u8 = 2;
pub const DEFAULT_TOUCH_PIN: u8 = 4;
pub const DEFAULT_ADC_PIN: u8 = 34;

/// 支持的 HTTP 协议版本
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HttpVersion {
    /// HTTP/1.1 版本
    V1_1,
}

use std::fmt;

impl fmt::Display for HttpVersion {
    /// 将枚举格式化为状态行中的版本字符串
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            HttpVersion::V1_1 => write!(f, "HTTP/1.1"),
        }
    }
}
