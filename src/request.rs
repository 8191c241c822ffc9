// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # HTTP 请求扫描模块
//!
//! 仪表板不对请求做完整的 HTTP 解析，只在单次读取得到的原始字节中
//! 查找控制指令标记。该模块负责：
//! 1. 按缓冲区上限截断原始字节（超出部分一律忽略）。
//! 2. 扫描 `/?led=on` 与 `/?led=off` 指令，"on" 优先。
//! 3. 为日志提取尽力而为的请求行。
//!
//! 请求字节不要求是合法的 UTF-8，也不要求是完整的报文。

use crate::param::{CRLF, DIRECTIVE_OFF, DIRECTIVE_ON};
use lazy_static::lazy_static;
use regex::bytes::Regex;

lazy_static! {
    static ref ON_PATTERN: Regex = Regex::new(&regex::escape(DIRECTIVE_ON)).unwrap();
    static ref OFF_PATTERN: Regex = Regex::new(&regex::escape(DIRECTIVE_OFF)).unwrap();
}

/// 控制指令：一次性地设置输出引脚电平
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// 输出引脚置高
    On,
    /// 输出引脚置低
    Off,
}

impl Directive {
    /// 在原始字节中扫描指令。
    ///
    /// 先检查 "on" 再检查 "off"，两者同时出现时 "on" 生效。
    pub fn scan(bytes: &[u8]) -> Option<Self> {
        if ON_PATTERN.is_match(bytes) {
            Some(Directive::On)
        } else if OFF_PATTERN.is_match(bytes) {
            Some(Directive::Off)
        } else {
            None
        }
    }

    /// 指令对应的输出引脚目标电平
    pub fn level(&self) -> bool {
        matches!(self, Directive::On)
    }
}

/// 单个连接读取到的原始请求
#[derive(Debug, Clone)]
pub struct Request {
    raw: Vec<u8>,
}

impl Request {
    /// 以缓冲区上限截断原始字节构建请求
    pub fn from_bytes(buffer: &[u8], cap: usize) -> Self {
        let end = buffer.len().min(cap);
        Self {
            raw: buffer[..end].to_vec(),
        }
    }

    /// 请求中携带的控制指令
    pub fn directive(&self) -> Option<Directive> {
        Directive::scan(&self.raw)
    }

    /// 请求行（首行），非 UTF-8 字节被替换，仅用于日志
    pub fn request_line(&self) -> String {
        let text = String::from_utf8_lossy(&self.raw);
        let line = match text.find(CRLF) {
            Some(i) => &text[..i],
            None => text.lines().next().unwrap_or(""),
        };
        line.trim().to_string()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}
