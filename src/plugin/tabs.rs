//! 标签页集合
//!
//! 已注册插件按发现顺序追加，槽位一经分配不再变动

use serde::Serialize;

use super::types::{IconRef, Plugin, PluginError};
use super::ui_types::{Surface, SurfaceUpdate};

/// 标签页
pub struct Tab {
    slot: usize,
    label: String,
    icon: Option<IconRef>,
    plugin: Box<dyn Plugin>,
}

impl Tab {
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> Option<&IconRef> {
        self.icon.as_ref()
    }

    pub fn surface(&self) -> Surface {
        self.plugin.surface()
    }

    pub fn summary(&self) -> TabSummary {
        TabSummary {
            slot: self.slot,
            label: self.label.clone(),
            icon: self.icon.as_ref().map(|i| i.as_str().to_string()),
        }
    }
}

/// 供展示层使用的标签页摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSummary {
    pub slot: usize,
    pub label: String,
    pub icon: Option<String>,
}

#[derive(Default)]
pub struct DisplayCollection {
    tabs: Vec<Tab>,
}

impl DisplayCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加标签页，返回分配的槽位
    pub(crate) fn push(
        &mut self,
        label: String,
        icon: Option<IconRef>,
        plugin: Box<dyn Plugin>,
    ) -> usize {
        let slot = self.tabs.len();
        self.tabs.push(Tab {
            slot,
            label,
            icon,
            plugin,
        });
        slot
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&Tab> {
        self.tabs.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.label.as_str()).collect()
    }

    pub fn summaries(&self) -> Vec<TabSummary> {
        self.tabs.iter().map(Tab::summary).collect()
    }

    /// 将用户操作转发给指定槽位的插件
    pub fn dispatch(
        &mut self,
        slot: usize,
        action: &str,
    ) -> Result<Vec<SurfaceUpdate>, PluginError> {
        let tab = self
            .tabs
            .get_mut(slot)
            .ok_or_else(|| PluginError::UnknownAction(format!("槽位 {} 不存在", slot)))?;
        tab.plugin.handle_action(action)
    }
}
