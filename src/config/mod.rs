//! 配置管理
//!
//! 分层加载：`config.toml` → `config.{APP_ENV}.toml` → `ESSAY_SYSTEM_*` 环境变量 → 常用环境变量覆盖。

#[path = "impl.rs"]
mod config_impl;
mod structs;

pub use structs::*;
