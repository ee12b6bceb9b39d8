pub use {
    error::{Error, Result},
    expect::Expectations,
    registry::ScenarioRegistry,
    report::{BalanceChange, BalanceLog, ItemView, Report},
    runner::ScenarioRunner,
    scenario::Scenario,
};

mod error;
mod expect;
mod registry;
mod report;
mod runner;
mod scenario;
