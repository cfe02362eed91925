//! 插件系统类型定义
//!
//! 定义 Plugin trait、PluginDescriptor、PluginUnit 等核心类型

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::ui_types::{Surface, SurfaceUpdate};

/// 插件错误类型
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("插件目录不存在: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("插件导入失败: {0}")]
    Import(String),

    #[error("插件文件无效: {0}")]
    InvalidUnit(String),

    #[error("插件未声明入口点")]
    MissingEntryPoint,

    #[error("未注册的入口点: {0}")]
    UnknownEntryPoint(String),

    #[error("插件构造失败: {0}")]
    ConstructorFailed(String),

    #[error("插件不满足接口约定: {0}")]
    ContractViolation(String),

    #[error("未知的插件操作: {0}")]
    UnknownAction(String),

    #[error("数据库错误: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 插件描述符
///
/// 目录扫描时生成，加载尝试结束后即丢弃
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginDescriptor {
    /// 标识符（去掉扩展名的文件名）
    pub identifier: String,
    /// 插件文件路径
    pub path: PathBuf,
}

impl PluginDescriptor {
    pub fn new(identifier: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            identifier: identifier.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.identifier, self.path.display())
    }
}

/// 插件文件内容 (`<identifier>.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PluginUnit {
    /// 入口点名称，对应 `EntryPoints` 中注册的工厂
    #[serde(default)]
    pub entry: Option<String>,
    /// 传递给工厂的插件配置
    #[serde(default)]
    pub settings: serde_json::Value,
}

impl PluginUnit {
    pub fn parse(content: &str) -> Result<Self, PluginError> {
        let unit: PluginUnit = serde_json::from_str(content)
            .map_err(|e| PluginError::InvalidUnit(format!("解析失败: {}", e)))?;
        Ok(unit)
    }

    /// 入口点名称，空白视为未声明
    pub fn entry_point(&self) -> Result<&str, PluginError> {
        match self.entry.as_deref().map(str::trim) {
            Some(entry) if !entry.is_empty() => Ok(entry),
            _ => Err(PluginError::MissingEntryPoint),
        }
    }
}

/// 图标引用 (图标名称或资源路径)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRef(pub String);

impl IconRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 传递给插件工厂的只读上下文
#[derive(Debug, Clone)]
pub struct PluginContext {
    /// 插件标识符
    pub identifier: String,
    /// 插件文件中的 settings
    pub settings: serde_json::Value,
}

impl PluginContext {
    pub fn new(identifier: impl Into<String>, settings: serde_json::Value) -> Self {
        Self {
            identifier: identifier.into(),
            settings,
        }
    }

    /// 读取字符串配置项
    pub fn setting_str(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(|v| v.as_str())
    }
}

/// 插件接口
///
/// 所有插件都必须实现此 trait，宿主据此统一处理不同插件
pub trait Plugin {
    /// 显示在标签页上的名称，不能为空
    fn name(&self) -> String;

    /// (可选) 图标
    fn icon(&self) -> Option<IconRef> {
        None
    }

    /// 插件要渲染的界面
    fn surface(&self) -> Surface {
        Surface::default()
    }

    /// 处理用户操作，返回需要推送给展示层的更新
    fn handle_action(&mut self, action: &str) -> Result<Vec<SurfaceUpdate>, PluginError> {
        Err(PluginError::UnknownAction(action.to_string()))
    }
}
