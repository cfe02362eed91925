use anyhow::{anyhow, Context};
use modudesk_lib::config::AppConfig;
use modudesk_lib::plugin::builtin::register_builtins;
use modudesk_lib::plugin::{EntryPoints, PluginHost, PluginLoader};
use modudesk_lib::{database, logger};

fn main() -> anyhow::Result<()> {
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("加载配置失败: {}", config_path.display()))?;

    if let Some(log_file) = logger::init_logging(&config.logging).map_err(|e| anyhow!(e))? {
        eprintln!("日志文件: {}", log_file.display());
    }

    let db = database::init_database(&config).map_err(|e| anyhow!("数据库初始化失败: {}", e))?;

    PluginLoader::ensure_plugins_dir(&config.plugins_dir)
        .with_context(|| format!("无法创建插件目录 {}", config.plugins_dir.display()))?;

    let mut entries = EntryPoints::new();
    register_builtins(&mut entries, &db);

    let mut host = PluginHost::new(&config.host, entries);
    let report = host
        .load_all(&config.plugins_dir)
        .with_context(|| format!("插件目录不可用: {}", config.plugins_dir.display()))?;

    for failure in &report.failures {
        eprintln!("插件 {} 加载失败: {}", failure.identifier, failure.message);
    }
    println!("已加载 {} 个插件", host.tabs().len());
    for tab in host.tabs().iter() {
        match tab.icon() {
            Some(icon) => println!("  [{}] {} ({})", tab.slot(), tab.label(), icon.as_str()),
            None => println!("  [{}] {}", tab.slot(), tab.label()),
        }
    }

    Ok(())
}
