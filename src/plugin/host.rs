//! 插件宿主
//!
//! 扫描插件目录并依次加载，单个插件失败只记录日志，不影响其他插件

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::HostConfig;

use super::entry::EntryPoints;
use super::loader::{Discovery, PluginLoader};
use super::tabs::DisplayCollection;
use super::types::{IconRef, Plugin, PluginContext, PluginDescriptor, PluginError};

/// 单个插件加载失败记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadFailure {
    pub identifier: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Registered { slot: usize },
    Failed(LoadFailure),
}

impl LoadOutcome {
    pub fn is_registered(&self) -> bool {
        matches!(self, LoadOutcome::Registered { .. })
    }
}

/// `load_all` 的结果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    /// 本次注册成功的标签名，按注册顺序
    pub registered: Vec<String>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn total(&self) -> usize {
        self.registered.len() + self.failures.len()
    }
}

pub struct PluginHost {
    loader: PluginLoader,
    entries: EntryPoints,
    tabs: DisplayCollection,
    sort_by_identifier: bool,
}

impl PluginHost {
    pub fn new(config: &HostConfig, entries: EntryPoints) -> Self {
        Self {
            loader: PluginLoader::new(config),
            entries,
            tabs: DisplayCollection::new(),
            sort_by_identifier: config.sort_by_identifier,
        }
    }

    pub fn tabs(&self) -> &DisplayCollection {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut DisplayCollection {
        &mut self.tabs
    }

    pub fn into_tabs(self) -> DisplayCollection {
        self.tabs
    }

    pub fn discover(&self, dir: &Path) -> Result<Discovery, PluginError> {
        self.loader.discover(dir)
    }

    /// 加载单个插件并注册到标签页集合
    ///
    /// 任何失败都在此处被捕获并记录，不会向外传播
    pub fn load_and_register(&mut self, descriptor: &PluginDescriptor) -> LoadOutcome {
        match self.instantiate(descriptor) {
            Ok((label, icon, plugin)) => {
                let slot = self.tabs.push(label.clone(), icon, plugin);
                info!(plugin = %descriptor.identifier, slot, "插件加载成功: {}", label);
                LoadOutcome::Registered { slot }
            }
            Err(e) => {
                warn!(plugin = %descriptor.identifier, "插件 {} 加载失败: {}", descriptor.identifier, e);
                LoadOutcome::Failed(LoadFailure {
                    identifier: descriptor.identifier.clone(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// 扫描目录并依次加载全部插件
    ///
    /// 只有目录级错误会返回 Err
    pub fn load_all(&mut self, dir: &Path) -> Result<LoadReport, PluginError> {
        let mut descriptors: Vec<PluginDescriptor> = self.discover(dir)?.collect();
        if self.sort_by_identifier {
            descriptors.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        }

        let mut report = LoadReport::default();
        for descriptor in &descriptors {
            match self.load_and_register(descriptor) {
                LoadOutcome::Registered { slot } => {
                    if let Some(tab) = self.tabs.get(slot) {
                        report.registered.push(tab.label().to_string());
                    }
                }
                LoadOutcome::Failed(failure) => report.failures.push(failure),
            }
        }

        info!(
            dir = %dir.display(),
            loaded = report.registered.len(),
            failed = report.failures.len(),
            "插件加载完成"
        );
        Ok(report)
    }

    fn instantiate(
        &self,
        descriptor: &PluginDescriptor,
    ) -> Result<(String, Option<IconRef>, Box<dyn Plugin>), PluginError> {
        let unit = self.loader.import(descriptor)?;
        let factory = self.entries.resolve(unit.entry_point()?)?;
        let ctx = PluginContext::new(descriptor.identifier.clone(), unit.settings.clone());

        let plugin = match catch_unwind(AssertUnwindSafe(|| factory(&ctx))) {
            Ok(Ok(plugin)) => plugin,
            Ok(Err(e)) => return Err(PluginError::ConstructorFailed(e.to_string())),
            Err(payload) => {
                return Err(PluginError::ConstructorFailed(format!(
                    "构造时 panic: {}",
                    panic_message(payload.as_ref())
                )))
            }
        };

        let (label, icon) = catch_unwind(AssertUnwindSafe(|| (plugin.name(), plugin.icon())))
            .map_err(|payload| {
                PluginError::ContractViolation(format!(
                    "读取插件名称时 panic: {}",
                    panic_message(payload.as_ref())
                ))
            })?;
        if label.trim().is_empty() {
            return Err(PluginError::ContractViolation(
                "插件必须定义名称".to_string(),
            ));
        }

        Ok((label, icon, plugin))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
