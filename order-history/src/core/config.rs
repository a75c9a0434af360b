use std::path::PathBuf;

use chrono_tz::Tz;

/// 默认业务时区
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Mexico_City;

/// 历史查询 limit 上限默认值
pub const DEFAULT_MAX_PAGE_LIMIT: u32 = 50;

/// 订单历史引擎配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/crab/order-history | 工作目录 |
/// | HISTORY_DB_FILE | order_history.db | SQLite 文件名 (位于 WORK_DIR 下) |
/// | BUSINESS_TIMEZONE | America/Mexico_City | 时间显示时区 |
/// | CURRENCY_SYMBOL | $ | 金额前缀 |
/// | HISTORY_MAX_PAGE_LIMIT | 50 | 分页 limit 上限 |
/// | ENABLE_ORDER_HISTORY | true | 为 false 时 track 不写入 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 滚动日志目录 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/crab BUSINESS_TIMEZONE=America/Monterrey cargo run --example history_timeline
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存放数据库和日志
    pub work_dir: String,
    /// SQLite 文件名
    pub db_file: String,
    /// 渲染时间戳使用的时区
    pub timezone: Tz,
    /// 金额前缀
    pub currency_symbol: String,
    /// 分页 limit 上限
    pub max_page_limit: u32,
    /// 是否记录订单历史
    pub enable_history: bool,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/crab/order-history".into()),
            db_file: std::env::var("HISTORY_DB_FILE")
                .unwrap_or_else(|_| "order_history.db".into()),
            timezone: std::env::var("BUSINESS_TIMEZONE")
                .ok()
                .map(|name| parse_timezone(&name))
                .unwrap_or(DEFAULT_TIMEZONE),
            currency_symbol: std::env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "$".into()),
            max_page_limit: std::env::var("HISTORY_MAX_PAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_MAX_PAGE_LIMIT),
            enable_history: std::env::var("ENABLE_ORDER_HISTORY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// 使用自定义工作目录
    ///
    /// 常用于测试场景
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    /// 数据库文件完整路径
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.db_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: "/var/lib/crab/order-history".into(),
            db_file: "order_history.db".into(),
            timezone: DEFAULT_TIMEZONE,
            currency_symbol: "$".into(),
            max_page_limit: DEFAULT_MAX_PAGE_LIMIT,
            enable_history: true,
            log_level: "info".into(),
            log_dir: None,
        }
    }
}

/// 解析时区名称，非法时回退到默认时区
pub fn parse_timezone(name: &str) -> Tz {
    name.trim().parse::<Tz>().unwrap_or_else(|_| {
        tracing::warn!(
            "Invalid BUSINESS_TIMEZONE '{}', falling back to {}",
            name,
            DEFAULT_TIMEZONE
        );
        DEFAULT_TIMEZONE
    })
}
