//! 插件加载器
//!
//! 扫描插件目录（仅一层），按扩展名过滤并跳过保留文件，读取插件文件

use std::fs;
use std::path::Path;

use crate::config::HostConfig;

use super::types::{PluginDescriptor, PluginError, PluginUnit};

pub struct PluginLoader {
    extension: String,
    reserved: Vec<String>,
}

impl PluginLoader {
    pub fn new(config: &HostConfig) -> Self {
        Self {
            extension: config.extension.trim_start_matches('.').to_string(),
            reserved: config.reserved.clone(),
        }
    }

    pub fn ensure_plugins_dir(dir: &Path) -> Result<(), PluginError> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// 扫描目录，返回惰性的描述符序列
    ///
    /// 目录不存在时直接失败；顺序为文件系统枚举顺序
    pub fn discover(&self, dir: &Path) -> Result<Discovery, PluginError> {
        if !dir.is_dir() {
            return Err(PluginError::DirectoryNotFound(dir.to_path_buf()));
        }
        let entries = fs::read_dir(dir).map_err(|e| {
            tracing::warn!("无法读取插件目录 {}: {}", dir.display(), e);
            PluginError::DirectoryNotFound(dir.to_path_buf())
        })?;
        Ok(Discovery {
            entries,
            extension: self.extension.clone(),
            reserved: self.reserved.clone(),
        })
    }

    /// 读取并解析插件文件
    pub fn import(&self, descriptor: &PluginDescriptor) -> Result<PluginUnit, PluginError> {
        let content = fs::read_to_string(&descriptor.path)
            .map_err(|e| PluginError::Import(format!("无法读取插件文件: {}", e)))?;
        PluginUnit::parse(&content)
    }
}

/// `PluginLoader::discover` 返回的迭代器
pub struct Discovery {
    entries: fs::ReadDir,
    extension: String,
    reserved: Vec<String>,
}

impl Discovery {
    fn descriptor_for(&self, entry: fs::DirEntry) -> Option<PluginDescriptor> {
        let path = entry.path();
        if entry.file_name().to_str().is_none() {
            tracing::debug!("跳过非 UTF-8 文件名: {}", path.display());
            return None;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
            return None;
        }
        let identifier = path.file_stem()?.to_str()?.to_string();
        if identifier.is_empty() || self.reserved.iter().any(|r| *r == identifier) {
            return None;
        }
        // 跟随符号链接，指向目录的链接也跳过
        if !path.is_file() {
            return None;
        }
        Some(PluginDescriptor::new(identifier, path))
    }
}

impl Iterator for Discovery {
    type Item = PluginDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("跳过无法读取的目录项: {}", e);
                    continue;
                }
            };
            if let Some(descriptor) = self.descriptor_for(entry) {
                return Some(descriptor);
            }
        }
    }
}
