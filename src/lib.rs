//! 模块化桌面应用骨架
//!
//! 标签页式插件宿主 + SQLite 日志存储。界面渲染由外部展示层负责，
//! 本 crate 只负责插件发现、加载、注册和事件持久化。

pub mod config;
pub mod database;
pub mod logger;
pub mod plugin;

pub use config::{AppConfig, HostConfig, LoggingConfig};
pub use database::Database;
pub use plugin::{DisplayCollection, EntryPoints, LoadReport, Plugin, PluginError, PluginHost};
