use {
    crate::{Error, Result, Scenario},
    std::collections::HashMap,
};

/// Named scenarios available to a run.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRegistry {
    scenarios: HashMap<String, Scenario>,
}

impl ScenarioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scenarios shipped with the harness.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Scenario::royalty());
        registry.register(Scenario::royalty_balances());
        registry
    }

    /// Adds `scenario` under its name, replacing any scenario registered under the same name.
    pub fn register(&mut self, scenario: Scenario) {
        self.scenarios.insert(scenario.name.clone(), scenario);
    }

    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&Scenario> {
        self.get(name).ok_or_else(|| Error::UnknownScenario(name.to_owned()))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scenarios.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_lists_royalty_scenarios() {
        let registry = ScenarioRegistry::builtin();

        assert_eq!(registry.names(), vec!["royalty", "royalty-balances"]);
        assert!(registry.get("royalty-balances").unwrap().log_balances);
        assert!(!registry.get("royalty").unwrap().log_balances);
    }

    #[test]
    fn test_later_registration_replaces_earlier_one() {
        let mut registry = ScenarioRegistry::new();
        registry.register(Scenario::royalty());

        registry.register(Scenario {
            price: "5".into(),
            ..Scenario::royalty()
        });

        assert_eq!(registry.names().len(), 1);
        assert_eq!(registry.get("royalty").unwrap().price, "5");
    }

    #[test]
    fn test_unknown_scenario_is_an_error() {
        let err = ScenarioRegistry::new().require("missing").unwrap_err();

        assert!(matches!(err, Error::UnknownScenario(name) if name == "missing"));
    }
}
