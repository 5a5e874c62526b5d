//! Constants for provider implementations

/// Default OpenAI base URL
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// DashScope OpenAI-compatible endpoint
pub const DASHSCOPE_COMPATIBLE_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";

/// DashScope native API endpoint
pub const DASHSCOPE_API_BASE_URL: &str = "https://dashscope.aliyuncs.com/api/v1";

/// Default DashScope chat model
pub const DASHSCOPE_DEFAULT_MODEL: &str = "qwen3-max";

/// Default DashScope embedding model
pub const DASHSCOPE_DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-v3";

/// iFlytek MaaS OpenAI-compatible endpoint
pub const XUNFEI_DEFAULT_BASE_URL: &str = "https://maas-api.cn-huabei-1.xf-yun.com/v1";

/// Default iFlytek MaaS model
pub const XUNFEI_DEFAULT_MODEL: &str = "xop3qwen1b7";

/// iFlytek preset sampling temperature
pub const XUNFEI_DEFAULT_TEMPERATURE: f32 = 0.7;

/// iFlytek preset completion length
pub const XUNFEI_DEFAULT_MAX_TOKENS: u32 = 2048;

/// Environment variable holding the DashScope key
pub const DASHSCOPE_API_KEY_ENV: &str = "DASHSCOPE_API_KEY";

/// Environment variable holding the iFlytek key
pub const XUNFEI_API_KEY_ENV: &str = "XUNFEI_API_KEY";

/// Environment variable overriding the iFlytek endpoint
pub const XUNFEI_API_URL_ENV: &str = "XUNFEI_API_URL";

/// Overall HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
