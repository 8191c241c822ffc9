// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 板载硬件状态仪表板
//!
//! 启动流程：
//! - 初始化 log4rs 日志（外部 YAML，缺失时退回控制台输出）
//! - 载入 TOML 配置（缺失时使用出厂默认值）
//! - 初始化板级实现并探测静态信息
//! - 绑定监听端口并进入顺序服务循环

use std::{
    process,
    sync::{Arc, Mutex},
};

use board_dashboard::{param::SERVER_NAME, Config, Device, HostBoard, Server};
use log::{error, info, warn, LevelFilter};
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config as LogConfig, Root},
    encode::pattern::PatternEncoder,
};
use tokio::runtime::Builder;

const LOG_CONFIG_PATH: &str = "config/log4rs.yaml";
const CONFIG_PATH: &str = "config/dashboard.toml";

fn init_logging() {
    if let Err(e) = log4rs::init_file(LOG_CONFIG_PATH, Default::default()) {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(
                "{d(%Y-%m-%d %H:%M:%S)} {h({l})} - {m}{n}",
            )))
            .build();
        let fallback = LogConfig::builder()
            .appender(Appender::builder().build("stdout", Box::new(stdout)))
            .build(Root::builder().appender("stdout").build(LevelFilter::Info));
        match fallback {
            Ok(config) => {
                if log4rs::init_config(config).is_ok() {
                    warn!("无法载入{}（{}），日志仅输出到控制台", LOG_CONFIG_PATH, e);
                }
            }
            Err(errors) => eprintln!("无法初始化日志系统：{}", errors),
        }
    }
}

fn main() {
    init_logging();

    let config = match Config::from_toml(CONFIG_PATH) {
        Ok(config) => {
            info!("配置文件已载入");
            config
        }
        Err(e) => {
            warn!("{}，使用默认配置", e);
            Config::new()
        }
    };

    // 单线程运行时：一次只服务一个连接
    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("无法创建异步运行时：{}", e);
            process::exit(1);
        }
    };

    runtime.block_on(async move {
        info!("接入点已启动：SSID {}", config.ssid());
        info!("连接该 WiFi 后访问 http://{}", config.ap_ip());

        let board = HostBoard::new(&config);
        let device = Arc::new(Mutex::new(Device::new(board)));

        let server = match Server::bind(config) {
            Ok(server) => server,
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        };
        info!("{} Web 服务已启动", SERVER_NAME);
        server.serve(device).await;
    });
}
