//! 插件系统模块
//!
//! 提供插件扩展功能，支持：
//! - 插件目录扫描（单层，按扩展名过滤）
//! - 通过入口点注册表实例化插件
//! - 单个插件失败隔离，只记录日志
//! - 标签页集合和声明式插件 UI

pub mod builtin;
mod entry;
mod host;
mod loader;
mod tabs;
mod types;
pub mod ui_types;

pub use entry::{EntryPoints, PluginFactory};
pub use host::{LoadFailure, LoadOutcome, LoadReport, PluginHost};
pub use loader::{Discovery, PluginLoader};
pub use tabs::{DisplayCollection, Tab, TabSummary};
pub use types::{IconRef, Plugin, PluginContext, PluginDescriptor, PluginError, PluginUnit};
pub use ui_types::{Surface, SurfaceUpdate, Widget, WidgetId};
