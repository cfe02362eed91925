//! 插件 UI 类型定义
//!
//! 声明式 UI 类型：插件声明界面结构，宿主应用负责渲染

use serde::{Deserialize, Serialize};

/// 组件 ID
pub type WidgetId = String;

// ============================================================================
// 组件定义
// ============================================================================

/// 组件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Widget {
    /// 文本标签
    Label { id: WidgetId, text: String },
    /// 按钮，点击时向插件发送 `action`
    Button {
        id: WidgetId,
        text: String,
        action: String,
    },
}

impl Widget {
    pub fn label(id: impl Into<String>, text: impl Into<String>) -> Self {
        Widget::Label {
            id: id.into(),
            text: text.into(),
        }
    }

    pub fn button(
        id: impl Into<String>,
        text: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Widget::Button {
            id: id.into(),
            text: text.into(),
            action: action.into(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Widget::Label { id, .. } | Widget::Button { id, .. } => id,
        }
    }
}

// ============================================================================
// Surface
// ============================================================================

/// 插件界面，组件按垂直顺序排列
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub widgets: Vec<Widget>,
}

impl Surface {
    pub fn new(widgets: Vec<Widget>) -> Self {
        Self { widgets }
    }

    pub fn find(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id() == id)
    }

    /// 按钮声明的操作名称列表
    pub fn actions(&self) -> Vec<&str> {
        self.widgets
            .iter()
            .filter_map(|w| match w {
                Widget::Button { action, .. } => Some(action.as_str()),
                Widget::Label { .. } => None,
            })
            .collect()
    }
}

// ============================================================================
// 更新消息
// ============================================================================

/// 插件处理操作后推送给展示层的更新
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SurfaceUpdate {
    /// 更新组件文本
    SetText { id: WidgetId, text: String },
}
