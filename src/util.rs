use crate::param::PLACEHOLDER;

/// 将运行秒数格式化为分级的可读文本。
///
/// 取第一个满足的档位：
/// - 天数大于 0：`{d}d {h}h {m}m`
/// - 小时大于 0：`{h}h {m}m {s}s`
/// - 其余：`{m}m {s}s`
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else {
        format!("{}m {}s", minutes, secs)
    }
}

/// 冒号分隔的小写十六进制 MAC 地址
pub fn format_mac(mac: &[u8; 6]) -> String {
    mac.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<String>>()
        .join(":")
}

/// 字节数向下取整为 KB
pub fn to_kb(bytes: u64) -> u64 {
    bytes / 1024
}

/// 温度保留一位小数，读取失败时使用占位值
pub fn format_temperature<E>(reading: Result<f32, E>) -> String {
    match reading {
        Ok(t) if t.is_finite() => format!("{:.1}", t),
        _ => PLACEHOLDER.to_string(),
    }
}
