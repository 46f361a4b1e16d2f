//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use acme_dns_aliyun_provider::{AliyunProvider, DnsClient};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的挑战值，避免与残留记录冲突
pub fn generate_challenge_value() -> String {
    format!("test-{}", uuid_fragment())
}

fn uuid_fragment() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{nanos:x}")
}

/// 测试上下文 - 封装 `DnsClient` 和测试域名
pub struct TestContext {
    pub client: DnsClient,
    pub domain: String,
}

impl TestContext {
    /// 从环境变量创建 Aliyun 测试上下文
    pub fn aliyun() -> Option<Self> {
        let access_key_id = env::var("ALIYUN_ACCESS_KEY_ID").ok()?;
        let access_key_secret = env::var("ALIYUN_ACCESS_KEY_SECRET").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;
        let region_id = env::var("ALIYUN_REGION_ID").unwrap_or_else(|_| "cn-hangzhou".to_string());

        let provider = AliyunProvider::builder(access_key_id, access_key_secret)
            .region_id(region_id)
            .build()
            .ok()?;

        Some(Self {
            client: DnsClient::new(Arc::new(provider)),
            domain,
        })
    }

    /// 该域名对应的挑战记录名
    pub fn validation_name(&self) -> String {
        format!("_acme-challenge.{}", self.domain)
    }
}
