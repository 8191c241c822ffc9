//! 仪表板页面渲染。纯函数：相同的快照总是得到逐字节相同的页面。

use bytes::Bytes;

use crate::snapshot::Snapshot;

const TITLE: &str = "ESP32 Dashboard";

const CSS: &str = r"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            padding: 20px;
        }
        .container { max-width: 1200px; margin: 0 auto; }
        .header, .card {
            background: white;
            border-radius: 15px;
            box-shadow: 0 10px 30px rgba(0,0,0,0.2);
        }
        .header { padding: 30px; margin-bottom: 20px; text-align: center; }
        h1 { color: #333; font-size: 2em; margin-bottom: 10px; }
        .subtitle { color: #666; font-size: 0.9em; }
        .dashboard {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
            gap: 20px;
        }
        .card { padding: 25px; }
        .card-title {
            font-size: 0.9em;
            color: #666;
            text-transform: uppercase;
            letter-spacing: 1px;
            margin-bottom: 15px;
        }
        .card-value { font-size: 2.5em; font-weight: bold; color: #333; margin-bottom: 10px; }
        .card-value.small { font-size: 1.8em; }
        .card-label { font-size: 0.9em; color: #999; }
        .unit { font-size: 0.5em; }
        .switch-container {
            display: flex;
            align-items: center;
            justify-content: center;
            gap: 15px;
            margin-top: 20px;
        }
        .switch { position: relative; display: inline-block; width: 80px; height: 40px; }
        .switch input { opacity: 0; width: 0; height: 0; }
        .slider {
            position: absolute;
            cursor: pointer;
            top: 0; left: 0; right: 0; bottom: 0;
            background-color: #ccc;
            transition: .4s;
            border-radius: 40px;
        }
        .slider:before {
            position: absolute;
            content: '';
            height: 32px; width: 32px;
            left: 4px; bottom: 4px;
            background-color: white;
            transition: .4s;
            border-radius: 50%;
        }
        input:checked + .slider { background-color: #4CAF50; }
        input:checked + .slider:before { transform: translateX(40px); }
        .switch-label { font-size: 1.1em; color: #333; font-weight: 500; }
        .status-indicator {
            display: inline-block;
            width: 12px; height: 12px;
            border-radius: 50%;
            margin-right: 8px;
        }
        .status-on { background-color: #4CAF50; }
        .status-off { background-color: #f44336; }
        .info-grid { display: grid; grid-template-columns: auto 1fr; gap: 10px; font-size: 0.9em; }
        .info-label { color: #666; font-weight: 500; }
        .info-value { color: #333; font-family: monospace; }
        .loading {
            position: fixed;
            top: 10px; right: 10px;
            background: rgba(255,255,255,0.9);
            padding: 10px 20px;
            border-radius: 20px;
            display: none;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
";

const SCRIPT: &str = r"
        let isUpdating = false;
        const loading = document.getElementById('loading');

        document.getElementById('ledToggle').addEventListener('change', function () {
            if (isUpdating) return;
            isUpdating = true;
            loading.style.display = 'block';
            fetch('/?led=' + (this.checked ? 'on' : 'off'))
                .then(() => setTimeout(() => {
                    isUpdating = false;
                    loading.style.display = 'none';
                }, 500))
                .catch(() => {
                    isUpdating = false;
                    loading.style.display = 'none';
                });
        });

        setInterval(() => {
            if (!isUpdating) {
                loading.style.display = 'block';
                location.reload();
            }
        }, 5000);
";

/// 输出引脚状态派生出的展示文本：(文字标签, 指示灯样式, 复选框属性)
fn led_display(on: bool) -> (&'static str, &'static str, &'static str) {
    if on {
        ("ON", "on", "checked")
    } else {
        ("OFF", "off", "")
    }
}

fn card(title: &str, value: &str, label: &str) -> String {
    format!(
        r#"
            <div class="card">
                <div class="card-title">{}</div>
                <div class="card-value">{}</div>
                <div class="card-label">{}</div>
            </div>"#,
        title, value, label
    )
}

fn body(snapshot: &Snapshot) -> String {
    let (led_text, led_variant, led_checked) = led_display(snapshot.output_pin_on);
    let mut cards = String::new();

    cards.push_str(&format!(
        r#"
            <div class="card">
                <div class="card-title">LED Control</div>
                <div class="card-value">
                    <span class="status-indicator status-{}"></span>
                    {}
                </div>
                <div class="switch-container">
                    <span class="switch-label">OFF</span>
                    <label class="switch">
                        <input type="checkbox" id="ledToggle" {}>
                        <span class="slider"></span>
                    </label>
                    <span class="switch-label">ON</span>
                </div>
            </div>"#,
        led_variant, led_text, led_checked
    ));
    cards.push_str(&card(
        "Touch Sensor",
        &snapshot.touch_value.to_string(),
        "GPIO4 capacitive",
    ));
    cards.push_str(&card(
        "Chip Temperature",
        &format!("{}&deg;F", snapshot.temp_f),
        "Internal sensor",
    ));
    cards.push_str(&card(
        "Free Memory",
        &format!(r#"{}<span class="unit">KB</span>"#, snapshot.free_mem_kb),
        &format!("of {} KB total", snapshot.total_mem_kb),
    ));
    cards.push_str(&card(
        "CPU Frequency",
        &format!(r#"{}<span class="unit">MHz</span>"#, snapshot.cpu_freq_mhz),
        "Dual-core Xtensa LX6",
    ));
    cards.push_str(&format!(
        r#"
            <div class="card">
                <div class="card-title">Uptime</div>
                <div class="card-value small">{}</div>
                <div class="card-label">Since last reset</div>
            </div>"#,
        snapshot.uptime_text
    ));
    cards.push_str(&card(
        "ADC (GPIO34)",
        &snapshot.adc_value.to_string(),
        "0-4095 raw value",
    ));
    cards.push_str(&format!(
        r#"
            <div class="card">
                <div class="card-title">Network Info</div>
                <div class="info-grid">
                    <div class="info-label">IP:</div>
                    <div class="info-value">{}</div>
                    <div class="info-label">MAC:</div>
                    <div class="info-value">{}</div>
                </div>
            </div>"#,
        snapshot.ip_addr, snapshot.mac_addr
    ));

    format!(
        r#"
    <div class="loading" id="loading">Updating...</div>
    <div class="container">
        <div class="header">
            <h1>{}</h1>
            <p class="subtitle">ESP32-WROOM-32 Real-time Monitoring</p>
        </div>
        <div class="dashboard">{}
        </div>
    </div>"#,
        TITLE, cards
    )
}

/// 将快照渲染为完整的 HTML 文档
pub fn render(snapshot: &Snapshot) -> Bytes {
    let html = format!(
        r##"<!DOCTYPE html>
<html>
<head>
    <title>{}</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>{}</style>
</head>
<body>{}
    <script>{}</script>
</body>
</html>"##,
        TITLE,
        CSS,
        body(snapshot),
        SCRIPT
    );
    Bytes::from(html)
}
