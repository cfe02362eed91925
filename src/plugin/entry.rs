//! 入口点注册表
//!
//! 插件文件通过 `entry` 字段引用在此注册的工厂

use std::collections::HashMap;

use super::types::{Plugin, PluginContext, PluginError};

/// 插件工厂
pub type PluginFactory = Box<dyn Fn(&PluginContext) -> Result<Box<dyn Plugin>, PluginError>>;

#[derive(Default)]
pub struct EntryPoints {
    factories: HashMap<String, PluginFactory>,
}

impl EntryPoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册入口点，同名时覆盖旧的工厂
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&PluginContext) -> Result<Box<dyn Plugin>, PluginError> + 'static,
    {
        let name = name.into();
        if self.factories.insert(name.clone(), Box::new(factory)).is_some() {
            tracing::debug!(entry = %name, "入口点已被覆盖");
        }
        self
    }

    pub fn resolve(&self, name: &str) -> Result<&PluginFactory, PluginError> {
        self.factories
            .get(name)
            .ok_or_else(|| PluginError::UnknownEntryPoint(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(String);

    impl Plugin for Named {
        fn name(&self) -> String {
            self.0.clone()
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let mut entries = EntryPoints::new();
        entries
            .register("a", |_| Ok(Box::new(Named("A".into())) as Box<dyn Plugin>))
            .register("b", |ctx| Ok(Box::new(Named(ctx.identifier.clone())) as Box<dyn Plugin>));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries.names(), vec!["a", "b"]);

        let ctx = PluginContext::new("from-ctx", serde_json::Value::Null);
        let plugin = (entries.resolve("b").unwrap())(&ctx).unwrap();
        assert_eq!(plugin.name(), "from-ctx");
    }

    #[test]
    fn test_resolve_unknown() {
        let entries = EntryPoints::new();
        assert!(entries.is_empty());
        assert!(matches!(
            entries.resolve("nope"),
            Err(PluginError::UnknownEntryPoint(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_register_overrides() {
        let mut entries = EntryPoints::new();
        entries.register("a", |_| Ok(Box::new(Named("old".into())) as Box<dyn Plugin>));
        entries.register("a", |_| Ok(Box::new(Named("new".into())) as Box<dyn Plugin>));

        let ctx = PluginContext::new("a", serde_json::Value::Null);
        let plugin = (entries.resolve("a").unwrap())(&ctx).unwrap();
        assert_eq!(plugin.name(), "new");
        assert_eq!(entries.len(), 1);
    }
}
