// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 板级能力接口
//!
//! 仪表板核心通过 [`Board`] 读取外设与系统状态，而不直接依赖具体的驱动。
//! 引脚模式、ADC 衰减、网络接入点的初始化都在实现内部完成。
//!
//! - [`Board`]：输出引脚、触摸、ADC、堆内存、运行时长、温度、频率与网络身份。
//! - [`StaticInfo`]：启动时探测一次并在每个快照中原样复用的常量。
//! - [`HostBoard`]：在开发主机上运行的实现，基于 `sysinfo` 读取真实的系统计数，
//!   没有对应硬件的外设给出模拟读数。

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};
use sysinfo::{Components, Networks, System};

use crate::{
    config::Config,
    exception::Exception,
    param::ADC_MAX,
    util::format_mac,
};

/// 堆内存计数（字节）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeapStats {
    pub free: u64,
    pub alloc: u64,
}

impl HeapStats {
    pub fn total(&self) -> u64 {
        self.free.saturating_add(self.alloc)
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Board: Send {
    /// 驱动输出引脚电平
    fn write_output(&mut self, on: bool);
    /// 电容触摸传感器原始读数
    fn read_touch(&mut self) -> u32;
    /// 模拟通道原始读数，标称范围 0..=4095
    fn read_adc(&mut self) -> u16;
    fn heap(&mut self) -> HeapStats;
    /// 自进程启动以来经过的时间
    fn uptime(&self) -> Duration;
    /// 片上温度（华氏度），探头不受支持或瞬时故障时返回错误
    fn temperature_f(&mut self) -> Result<f32, Exception>;
    fn cpu_freq_hz(&self) -> u64;
    fn ip_addr(&self) -> Ipv4Addr;
    fn mac_addr(&self) -> [u8; 6];
}

/// 进程生命周期内不变的展示值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticInfo {
    pub ip_addr: String,
    pub mac_addr: String,
    pub cpu_freq_mhz: String,
}

impl StaticInfo {
    pub fn probe<B: Board + ?Sized>(board: &B) -> Self {
        Self {
            ip_addr: board.ip_addr().to_string(),
            mac_addr: format_mac(&board.mac_addr()),
            cpu_freq_mhz: (board.cpu_freq_hz() / 1_000_000).to_string(),
        }
    }
}

/// 未触摸时电容触摸通道的典型读数
const TOUCH_IDLE: u32 = 600;

/// 开发主机上的板级实现
pub struct HostBoard {
    system: System,
    components: Components,
    started: Instant,
    output_pin: u8,
    output_level: bool,
    ip_addr: Ipv4Addr,
    mac_addr: [u8; 6],
    cpu_freq_hz: u64,
}

impl HostBoard {
    pub fn new(config: &Config) -> Self {
        let pins = config.pins();
        info!(
            "使用主机板级实现（无硬件访问）：输出 GPIO{}，触摸 GPIO{}，ADC GPIO{}",
            pins.output(),
            pins.touch(),
            pins.adc()
        );
        debug!(
            "ADC 衰减档位 {:?}，满量程 {}mV",
            config.adc_attenuation(),
            config.adc_attenuation().full_scale_mv()
        );

        let mut system = System::new();
        system.refresh_cpu();
        let cpu_freq_hz = system
            .cpus()
            .first()
            .map(|cpu| cpu.frequency() * 1_000_000)
            .unwrap_or(0);

        let ip_addr = match config.ap_ip().parse::<Ipv4Addr>() {
            Ok(ip) => ip,
            Err(_) => {
                warn!("ap_ip {} 不是合法的 IPv4 地址，使用 0.0.0.0", config.ap_ip());
                Ipv4Addr::UNSPECIFIED
            }
        };

        let mut board = Self {
            system,
            components: Components::new_with_refreshed_list(),
            started: Instant::now(),
            output_pin: pins.output(),
            output_level: false,
            ip_addr,
            mac_addr: first_interface_mac(),
            cpu_freq_hz,
        };
        board.write_output(false);
        board
    }

    /// 最近一次写入输出引脚的电平
    pub fn output_level(&self) -> bool {
        self.output_level
    }
}

/// 按名称排序后第一个非全零 MAC 的网卡地址
fn first_interface_mac() -> [u8; 6] {
    let networks = Networks::new_with_refreshed_list();
    let mut macs: Vec<(String, [u8; 6])> = networks
        .iter()
        .map(|(name, data)| (name.clone(), data.mac_address().0))
        .filter(|(_, mac)| mac.iter().any(|b| *b != 0))
        .collect();
    macs.sort();
    macs.first().map(|(_, mac)| *mac).unwrap_or([0; 6])
}

impl Board for HostBoard {
    fn write_output(&mut self, on: bool) {
        self.output_level = on;
        debug!(
            "GPIO{} 输出 {}",
            self.output_pin,
            if on { "HIGH" } else { "LOW" }
        );
    }

    fn read_touch(&mut self) -> u32 {
        trace!("触摸通道无硬件，返回空闲读数");
        TOUCH_IDLE
    }

    fn read_adc(&mut self) -> u16 {
        // 以整机 CPU 负载模拟模拟量输入
        self.system.refresh_cpu();
        let usage = self.system.global_cpu_info().cpu_usage().clamp(0.0, 100.0);
        ((usage / 100.0) * ADC_MAX as f32) as u16
    }

    fn heap(&mut self) -> HeapStats {
        self.system.refresh_memory();
        HeapStats {
            free: self.system.free_memory(),
            alloc: self.system.used_memory(),
        }
    }

    fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    fn temperature_f(&mut self) -> Result<f32, Exception> {
        self.components.refresh();
        let celsius = self
            .components
            .iter()
            .map(|c| c.temperature())
            .filter(|t| t.is_finite())
            .fold(None, |max: Option<f32>, t| Some(max.map_or(t, |m| m.max(t))));
        match celsius {
            Some(c) => Ok(c * 9.0 / 5.0 + 32.0),
            None => Err(Exception::TemperatureUnavailable),
        }
    }

    fn cpu_freq_hz(&self) -> u64 {
        self.cpu_freq_hz
    }

    fn ip_addr(&self) -> Ipv4Addr {
        self.ip_addr
    }

    fn mac_addr(&self) -> [u8; 6] {
        self.mac_addr
    }
}
