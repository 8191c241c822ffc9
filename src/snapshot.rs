// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 外设快照
//!
//! 每个请求都从实时读数构造一个全新的 [`Snapshot`]，渲染后即丢弃。
//! 采集过程从不失败：读取失败的字段用占位值填充。

use serde_derive::Serialize;

use crate::{
    board::{Board, StaticInfo},
    control::DeviceState,
    util::{format_temperature, format_uptime, to_kb},
    param::ADC_MAX,
};

/// 一次性、不可变的仪表板读数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub output_pin_on: bool,
    pub touch_value: u32,
    pub adc_value: u16,
    pub free_mem_kb: u64,
    pub total_mem_kb: u64,
    pub uptime_text: String,
    /// 华氏温度文本，或占位值 `N/A`
    pub temp_f: String,
    pub cpu_freq_mhz: String,
    pub ip_addr: String,
    pub mac_addr: String,
}

impl Snapshot {
    /// 采集快照。
    ///
    /// `state` 与 `board` 以可变借用传入，调用方必须保证从指令生效到采集完成之间
    /// 没有其它写者。
    pub fn capture<B: Board + ?Sized>(
        state: &DeviceState,
        board: &mut B,
        info: &StaticInfo,
    ) -> Self {
        let touch_value = board.read_touch();
        let adc_value = board.read_adc().min(ADC_MAX);

        let heap = board.heap();
        let free_mem_kb = to_kb(heap.free);
        let total_mem_kb = to_kb(heap.total());

        let uptime_text = format_uptime(board.uptime().as_secs());
        let temp_f = format_temperature(board.temperature_f());

        Self {
            output_pin_on: state.output_pin_on(),
            touch_value,
            adc_value,
            free_mem_kb,
            total_mem_kb,
            uptime_text,
            temp_f,
            cpu_freq_mhz: info.cpu_freq_mhz.clone(),
            ip_addr: info.ip_addr.clone(),
            mac_addr: info.mac_addr.clone(),
        }
    }
}
