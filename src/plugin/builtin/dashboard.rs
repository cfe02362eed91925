//! 数据仪表盘插件
//!
//! 点击按钮向 `system_logs` 写入一条记录

use crate::database::Database;
use crate::plugin::types::{IconRef, Plugin, PluginContext, PluginError};
use crate::plugin::ui_types::{Surface, SurfaceUpdate, Widget};

pub const ENTRY_POINT: &str = "dashboard";

const DEFAULT_TITLE: &str = "仪表盘";
const WELCOME_TEXT: &str = "欢迎使用功能 A：数据仪表盘";
const SAVED_TEXT: &str = "数据已保存！";
const LOG_MESSAGE: &str = "用户点击了按钮";
const ACTION_LOG_DATA: &str = "log_data";

pub struct DashboardPlugin {
    title: String,
    icon: Option<IconRef>,
    status: String,
    db: Database,
}

impl DashboardPlugin {
    pub fn new(db: Database) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            icon: None,
            status: WELCOME_TEXT.to_string(),
            db,
        }
    }

    /// 从插件文件的 settings 读取 `title` 和 `icon`
    pub fn from_context(ctx: &PluginContext, db: Database) -> Self {
        let mut plugin = Self::new(db);
        if let Some(title) = ctx.setting_str("title").filter(|t| !t.trim().is_empty()) {
            plugin.title = title.to_string();
        }
        plugin.icon = ctx.setting_str("icon").map(IconRef::new);
        plugin
    }

    fn log_data(&mut self) -> Result<Vec<SurfaceUpdate>, PluginError> {
        self.db.record_event(LOG_MESSAGE)?;
        self.status = SAVED_TEXT.to_string();
        Ok(vec![SurfaceUpdate::SetText {
            id: "status".to_string(),
            text: self.status.clone(),
        }])
    }
}

impl Plugin for DashboardPlugin {
    fn name(&self) -> String {
        self.title.clone()
    }

    fn icon(&self) -> Option<IconRef> {
        self.icon.clone()
    }

    fn surface(&self) -> Surface {
        Surface::new(vec![
            Widget::label("status", self.status.clone()),
            Widget::button("log-btn", "记录一条日志到数据库", ACTION_LOG_DATA),
        ])
    }

    fn handle_action(&mut self, action: &str) -> Result<Vec<SurfaceUpdate>, PluginError> {
        match action {
            ACTION_LOG_DATA => self.log_data(),
            other => Err(PluginError::UnknownAction(other.to_string())),
        }
    }
}
