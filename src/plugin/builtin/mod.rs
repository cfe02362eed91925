//! 内置插件
//!
//! 随程序一起编译的插件，通过入口点名称在插件文件中引用

pub mod dashboard;

pub use dashboard::DashboardPlugin;

use crate::database::Database;

use super::entry::EntryPoints;
use super::types::Plugin;

/// 注册全部内置入口点
pub fn register_builtins(entries: &mut EntryPoints, db: &Database) {
    let db = db.clone();
    entries.register(dashboard::ENTRY_POINT, move |ctx| {
        Ok(Box::new(DashboardPlugin::from_context(ctx, db.clone())) as Box<dyn Plugin>)
    });
}
