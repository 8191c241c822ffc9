use serde_derive::Deserialize;
use serde_derive::Serialize;

use log::{error, warn};
use std::fs::File;
use std::io::prelude::*;
use std::time::Duration;

use crate::{exception::Exception, param::*};

/// ADC 衰减档位，决定模拟输入的满量程电压
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum AdcAttenuation {
    #[serde(rename = "0db")]
    Db0,
    #[serde(rename = "2.5db")]
    Db2_5,
    #[serde(rename = "6db")]
    Db6,
    #[serde(rename = "11db")]
    Db11,
}

impl AdcAttenuation {
    /// 该档位下的满量程电压（毫伏）
    pub fn full_scale_mv(&self) -> u32 {
        match self {
            AdcAttenuation::Db0 => 1100,
            AdcAttenuation::Db2_5 => 1500,
            AdcAttenuation::Db6 => 2200,
            AdcAttenuation::Db11 => 3300,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PinConfig {
    #[serde(default = "default_output_pin")]
    output: u8,
    #[serde(default = "default_touch_pin")]
    touch: u8,
    #[serde(default = "default_adc_pin")]
    adc: u8,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT_PIN,
            touch: DEFAULT_TOUCH_PIN,
            adc: DEFAULT_ADC_PIN,
        }
    }
}

impl PinConfig {
    pub fn output(&self) -> u8 {
        self.output
    }

    pub fn touch(&self) -> u8 {
        self.touch
    }

    pub fn adc(&self) -> u8 {
        self.adc
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_ssid")]
    ssid: String,
    #[serde(default = "default_password")]
    password: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_backlog")]
    backlog: u32,
    #[serde(default = "default_io_timeout_ms")]
    io_timeout_ms: u64,
    #[serde(default = "default_buffer_size")]
    buffer_size: usize,
    #[serde(default)]
    local: bool,
    #[serde(default = "default_ap_ip")]
    ap_ip: String,
    #[serde(default)]
    pins: PinConfig,
    #[serde(default = "default_adc_attenuation")]
    adc_attenuation: AdcAttenuation,
}

fn default_ssid() -> String {
    DEFAULT_SSID.to_string()
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_backlog() -> u32 {
    DEFAULT_BACKLOG
}

fn default_io_timeout_ms() -> u64 {
    DEFAULT_IO_TIMEOUT_MS
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

fn default_ap_ip() -> String {
    DEFAULT_AP_IP.to_string()
}

fn default_output_pin() -> u8 {
    DEFAULT_OUTPUT_PIN
}

fn default_touch_pin() -> u8 {
    DEFAULT_TOUCH_PIN
}

fn default_adc_pin() -> u8 {
    DEFAULT_ADC_PIN
}

fn default_adc_attenuation() -> AdcAttenuation {
    AdcAttenuation::Db11
}

impl Config {
    pub fn new() -> Self {
        Self {
            ssid: default_ssid(),
            password: default_password(),
            port: default_port(),
            backlog: default_backlog(),
            io_timeout_ms: default_io_timeout_ms(),
            buffer_size: default_buffer_size(),
            local: false,
            ap_ip: default_ap_ip(),
            pins: PinConfig::default(),
            adc_attenuation: default_adc_attenuation(),
        }
    }

    /// 从 TOML 文件载入配置。
    ///
    /// 文件不可读时返回错误，由调用方决定是否退回默认配置；
    /// 文件内容无法解析时记录错误并直接使用默认配置。
    pub fn from_toml(filename: &str) -> Result<Self, Exception> {
        let mut file = match File::open(filename) {
            Ok(f) => f,
            Err(e) => {
                error!("无法打开配置文件{}：{}", filename, e);
                return Err(Exception::ConfigUnreadable);
            }
        };
        let mut str_val = String::new();
        if let Err(e) = file.read_to_string(&mut str_val) {
            error!("读取配置文件{}时出错：{}", filename, e);
            return Err(Exception::ConfigUnreadable);
        }
        Ok(Self::from_toml_str(&str_val))
    }

    /// 从 TOML 文本构建配置，解析失败时使用默认配置
    pub fn from_toml_str(text: &str) -> Self {
        let raw_config: Config = match toml::from_str(text) {
            Ok(t) => t,
            Err(e) => {
                error!("无法成功从配置文件构建配置对象，使用默认配置：{}", e);
                Config::new()
            }
        };
        raw_config.sanitize()
    }

    fn sanitize(mut self) -> Self {
        if self.backlog == 0 {
            warn!("backlog被设置为0，该值将被改为{}。", DEFAULT_BACKLOG);
            self.backlog = DEFAULT_BACKLOG;
        }
        if self.io_timeout_ms == 0 {
            warn!(
                "io_timeout_ms被设置为0，不允许无期限的连接，该值将被改为{}。",
                DEFAULT_IO_TIMEOUT_MS
            );
            self.io_timeout_ms = DEFAULT_IO_TIMEOUT_MS;
        }
        if self.buffer_size == 0 {
            warn!("buffer_size被设置为0，该值将被改为{}。", DEFAULT_BUFFER_SIZE);
            self.buffer_size = DEFAULT_BUFFER_SIZE;
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            warn!(
                "接入点口令短于{}个字符，WPA2 接入点可能拒绝启动。",
                MIN_PASSWORD_LEN
            );
        }
        self
    }
}

impl Config {
    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn backlog(&self) -> u32 {
        self.backlog
    }

    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn local(&self) -> bool {
        self.local
    }

    pub fn ap_ip(&self) -> &str {
        &self.ap_ip
    }

    pub fn pins(&self) -> &PinConfig {
        &self.pins
    }

    pub fn adc_attenuation(&self) -> AdcAttenuation {
        self.adc_attenuation
    }
}

impl Config {
    /// 以指定端口构造配置，其余字段保持默认值
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout_ms = timeout.as_millis().max(1) as u64;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
