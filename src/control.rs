// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 设备状态与控制指令
//!
//! 输出引脚的开关是唯一跨请求保存的状态。[`Device`] 持有该状态、板级实现
//! 以及启动时探测的常量；[`Device::serve`] 在同一次可变借用内完成
//! "应用指令 → 采集快照"，调用方再配合互斥锁即可保证两步之间没有其它写者。

use log::debug;

use crate::{
    board::{Board, StaticInfo},
    request::{Directive, Request},
    snapshot::Snapshot,
};

/// 进程级设备状态，启动时输出引脚为关
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceState {
    output_pin_on: bool,
}

impl DeviceState {
    pub fn new() -> Self {
        Self {
            output_pin_on: false,
        }
    }

    pub fn output_pin_on(&self) -> bool {
        self.output_pin_on
    }

    pub fn set_output(&mut self, on: bool) {
        self.output_pin_on = on;
    }
}

/// 扫描请求字节并至多执行一次状态写入。
///
/// 没有可识别的指令时状态保持不变；畸形或被截断的输入同样是空操作。
pub fn apply_directive<B: Board + ?Sized>(
    state: &mut DeviceState,
    board: &mut B,
    request: &[u8],
) -> Option<Directive> {
    let directive = Directive::scan(request)?;
    let level = directive.level();
    state.set_output(level);
    board.write_output(level);
    Some(directive)
}

/// 设备：状态、板级实现与常量的唯一所有者
pub struct Device<B: Board> {
    state: DeviceState,
    board: B,
    info: StaticInfo,
}

impl<B: Board> Device<B> {
    /// 探测常量并把输出引脚驱动到初始的关状态
    pub fn new(mut board: B) -> Self {
        let state = DeviceState::new();
        board.write_output(state.output_pin_on());
        let info = StaticInfo::probe(&board);
        debug!(
            "静态信息：IP {}，MAC {}，CPU {}MHz",
            info.ip_addr, info.mac_addr, info.cpu_freq_mhz
        );
        Self { state, board, info }
    }

    /// 应用请求中的指令，然后采集快照
    pub fn serve(&mut self, request: &Request) -> (Option<Directive>, Snapshot) {
        let directive = apply_directive(&mut self.state, &mut self.board, request.as_bytes());
        let snapshot = Snapshot::capture(&self.state, &mut self.board, &self.info);
        (directive, snapshot)
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn info(&self) -> &StaticInfo {
        &self.info
    }

    pub fn board(&self) -> &B {
        &self.board
    }
}
